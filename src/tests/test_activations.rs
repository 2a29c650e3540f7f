use ndarray::{array, Array1};

use crate::activations::Activation;

#[test]
fn test_relu() {
    let relu = Activation::Relu;
    assert_eq!(relu.compute(-1.0), 0.0);
    assert_eq!(relu.compute(0.0), 0.0);
    assert_eq!(relu.compute(2.0), 2.0);
    assert_eq!(relu.derivative(-1.0, 0.0), 0.0);
    assert_eq!(relu.derivative(2.0, 2.0), 1.0);
}

#[test]
fn test_parametric_relu() {
    let prelu = Activation::ParametricRelu { alpha: 0.01 };
    assert_eq!(prelu.compute(-2.0), -0.02);
    assert_eq!(prelu.compute(3.0), 3.0);
    assert_eq!(prelu.derivative(-2.0, -0.02), 0.01);
    assert_eq!(prelu.derivative(3.0, 3.0), 1.0);
}

#[test]
fn test_linear() {
    let linear = Activation::Linear;
    assert_eq!(linear.compute(-3.5), -3.5);
    assert_eq!(linear.derivative(-3.5, -3.5), 1.0);
}

#[test]
fn test_sigmoid() {
    let sigmoid = Activation::Sigmoid;
    assert!((sigmoid.compute(0.0) - 0.5).abs() < 1e-12);
    // The derivative is expressed in terms of the activation output.
    assert!((sigmoid.derivative(0.0, 0.5) - 0.25).abs() < 1e-12);
}

#[test]
fn test_sigmoid_extreme_inputs_stay_finite() {
    let sigmoid = Activation::Sigmoid;
    let hi = sigmoid.compute(1e6);
    let lo = sigmoid.compute(-1e6);
    assert!(hi.is_finite());
    assert!(lo.is_finite());
    assert_eq!(hi, 1.0);
    assert_eq!(lo, 0.0);
}

#[test]
fn test_tanh_clamps_large_magnitudes() {
    let tanh = Activation::Tanh;
    assert_eq!(tanh.compute(25.0), 1.0);
    assert_eq!(tanh.compute(-25.0), -1.0);
    assert!((tanh.compute(0.5) - 0.5f64.tanh()).abs() < 1e-15);
    // Derivative reads the activation output.
    let f = 0.5f64.tanh();
    assert!((tanh.derivative(0.5, f) - (1.0 - f * f)).abs() < 1e-15);
}

#[test]
fn test_softmax_compute_is_identity() {
    // Normalization is deferred entirely to post_process.
    let softmax = Activation::Softmax;
    assert_eq!(softmax.compute(3.25), 3.25);
}

#[test]
fn test_softmax_post_process() {
    let softmax = Activation::Softmax;
    let mut values = array![1.0, 2.0, 3.0];
    softmax.post_process(&mut values);

    assert!((values.sum() - 1.0).abs() < 1e-9);
    assert!((values[0] - 0.09003057).abs() < 1e-6);
    assert!((values[1] - 0.24472847).abs() < 1e-6);
    assert!((values[2] - 0.66524096).abs() < 1e-6);
}

#[test]
fn test_softmax_post_process_large_inputs() {
    // Subtracting the max keeps exp from overflowing.
    let softmax = Activation::Softmax;
    let mut values = array![1000.0, 1001.0, 999.0];
    softmax.post_process(&mut values);

    for &v in values.iter() {
        assert!(v.is_finite());
    }
    assert!((values.sum() - 1.0).abs() < 1e-9);
}

#[test]
fn test_softmax_post_process_edge_cases() {
    let softmax = Activation::Softmax;

    let mut empty = Array1::<f64>::zeros(0);
    softmax.post_process(&mut empty);
    assert!(empty.is_empty());

    let mut single = array![42.0];
    softmax.post_process(&mut single);
    assert_eq!(single[0], 1.0);
}

#[test]
fn test_other_post_process_is_noop() {
    let mut values = array![-1.0, 0.5, 2.0];
    Activation::Tanh.post_process(&mut values);
    assert_eq!(values, array![-1.0, 0.5, 2.0]);
}

#[test]
fn test_name_resolve_round_trip() {
    let variants = [
        Activation::Linear,
        Activation::Relu,
        Activation::ParametricRelu { alpha: 0.01 },
        Activation::Sigmoid,
        Activation::Tanh,
        Activation::Softmax,
    ];
    for variant in variants {
        let resolved = Activation::resolve(&variant.name());
        assert_eq!(resolved, Some(variant));
    }
}

#[test]
fn test_resolve_unknown_identifier() {
    assert_eq!(Activation::resolve("Unknown.Bogus"), None);
    assert_eq!(Activation::resolve(""), None);
    assert_eq!(Activation::resolve("ParametricReLU(nope)"), None);
}

#[test]
fn test_parametric_relu_identifier_keeps_exact_slope() {
    let original = Activation::ParametricRelu { alpha: 0.1 + 0.2 };
    match Activation::resolve(&original.name()) {
        Some(Activation::ParametricRelu { alpha }) => {
            assert_eq!(alpha, 0.1 + 0.2);
        }
        other => panic!("unexpected resolution: {:?}", other),
    }
}
