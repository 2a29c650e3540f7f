use std::io::Cursor;

use ndarray::{array, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::activations::Activation;
use crate::error::MinervaError;
use crate::layers::Layer;
use crate::network::{LayerConfig, Network};
use crate::persistence;

fn trained_network(rng: &mut StdRng) -> Network {
    let configs = [
        LayerConfig::new(5, Activation::Tanh, 0.5),
        LayerConfig::new(4, Activation::ParametricRelu { alpha: 0.01 }, 0.5),
        LayerConfig::new(3, Activation::Softmax, 0.5),
    ];
    let mut network = Network::new(3, &configs, rng).unwrap();

    let inputs = Array2::from_shape_fn((10, 3), |_| rng.gen_range(-1.0..1.0));
    let targets = Array2::from_shape_fn((10, 3), |(_, j)| if j == 0 { 1.0 } else { 0.0 });
    network
        .train(inputs.view(), targets.view(), 5, 0.05, 0.9, rng,
            |targets, outputs, mut errors| {
                for k in 0..errors.len() {
                    errors[k] = targets[k] - outputs[k];
                }
            })
        .unwrap();
    network
}

#[test]
fn test_wire_format_layout() {
    let mut rng = StdRng::seed_from_u64(1);
    let configs = [LayerConfig::new(1, Activation::Linear, 0.1)];
    let mut network = Network::new(1, &configs, &mut rng).unwrap();
    network.layers_mut()[0].weights_mut()[[0, 0]] = 2.0;
    network.layers_mut()[0].biases_mut()[0] = 1.0;

    let mut bytes = Vec::new();
    network.save_to(&mut bytes).unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(&1i32.to_le_bytes()); // layer count
    expected.extend_from_slice(&1i32.to_le_bytes()); // first layer input count
    expected.extend_from_slice(&1i32.to_le_bytes()); // layer output count
    expected.extend_from_slice(&6i32.to_le_bytes()); // identifier length
    expected.extend_from_slice(b"Linear");
    expected.extend_from_slice(&2.0f64.to_le_bytes()); // weights, row-major
    expected.extend_from_slice(&1.0f64.to_le_bytes()); // biases

    assert_eq!(bytes, expected);
}

#[test]
fn test_save_load_round_trip_is_bit_identical() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut network = trained_network(&mut rng);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.net");
    network.save(&path).unwrap();
    let mut restored = Network::load(&path).unwrap();

    assert_eq!(restored.nbr_inputs(), network.nbr_inputs());
    assert_eq!(restored.nbr_outputs(), network.nbr_outputs());

    for _ in 0..20 {
        let input = array![
            rng.gen_range(-2.0..2.0),
            rng.gen_range(-2.0..2.0),
            rng.gen_range(-2.0..2.0)
        ];
        let original = network.forward(input.view()).unwrap().to_vec();
        let reloaded = restored.forward(input.view()).unwrap().to_vec();
        assert_eq!(original, reloaded);
    }
}

#[test]
fn test_loaded_network_rejects_training() {
    let mut rng = StdRng::seed_from_u64(22);
    let network = trained_network(&mut rng);

    let mut bytes = Vec::new();
    network.save_to(&mut bytes).unwrap();
    let mut restored = Network::load_from(&mut Cursor::new(bytes), Activation::resolve).unwrap();

    let inputs = Array2::zeros((2, 3));
    let targets = Array2::zeros((2, 3));
    let result = restored.train(inputs.view(), targets.view(), 1, 0.05, 0.0, &mut rng,
        |_, _, _| {});
    assert!(matches!(result, Err(MinervaError::NotTrainable(_))));
}

#[test]
fn test_load_truncated_state_fails() {
    let mut rng = StdRng::seed_from_u64(23);
    let network = trained_network(&mut rng);

    let mut bytes = Vec::new();
    network.save_to(&mut bytes).unwrap();
    bytes.truncate(bytes.len() / 2);

    let result = Network::load_from(&mut Cursor::new(bytes), Activation::resolve);
    assert!(matches!(result, Err(MinervaError::PersistenceError(_))));
}

#[test]
fn test_load_malformed_header_fails() {
    for layer_count in [0i32, -3] {
        let mut bytes = Vec::new();
        persistence::write_i32(&mut bytes, layer_count).unwrap();
        persistence::write_i32(&mut bytes, 1).unwrap();

        let result = Network::load_from(&mut Cursor::new(bytes), Activation::resolve);
        assert!(matches!(result, Err(MinervaError::PersistenceError(_))));
    }
}

#[test]
fn test_load_unknown_activation_fails() {
    let mut bytes = Vec::new();
    persistence::write_i32(&mut bytes, 1).unwrap(); // layer count
    persistence::write_i32(&mut bytes, 1).unwrap(); // input count
    persistence::write_i32(&mut bytes, 1).unwrap(); // output count
    persistence::write_string(&mut bytes, "Unknown.Bogus").unwrap();
    persistence::write_f64(&mut bytes, 2.0).unwrap();
    persistence::write_f64(&mut bytes, 1.0).unwrap();

    match Network::load_from(&mut Cursor::new(bytes), Activation::resolve) {
        Err(MinervaError::UnknownActivation { name }) => assert_eq!(name, "Unknown.Bogus"),
        other => panic!("expected resolution failure, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_load_with_custom_resolver() {
    let mut bytes = Vec::new();
    persistence::write_i32(&mut bytes, 1).unwrap();
    persistence::write_i32(&mut bytes, 1).unwrap();
    persistence::write_i32(&mut bytes, 1).unwrap();
    persistence::write_string(&mut bytes, "Custom.Identity").unwrap();
    persistence::write_f64(&mut bytes, 2.0).unwrap();
    persistence::write_f64(&mut bytes, 1.0).unwrap();

    let resolver = |name: &str| match name {
        "Custom.Identity" => Some(Activation::Linear),
        other => Activation::resolve(other),
    };
    let mut network = Network::load_from(&mut Cursor::new(bytes), resolver).unwrap();
    let output = network.forward(array![3.0].view()).unwrap();
    assert_eq!(output[0], 7.0);
}

#[test]
fn test_parametric_relu_round_trips_through_identifier() {
    let mut rng = StdRng::seed_from_u64(29);
    let configs = [LayerConfig::new(2, Activation::ParametricRelu { alpha: 0.125 }, 0.5)];
    let network = Network::new(2, &configs, &mut rng).unwrap();

    let mut bytes = Vec::new();
    network.save_to(&mut bytes).unwrap();
    let restored = Network::load_from(&mut Cursor::new(bytes), Activation::resolve).unwrap();

    assert_eq!(
        restored.layers()[0].activation(),
        Activation::ParametricRelu { alpha: 0.125 }
    );
}
