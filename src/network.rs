use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use ndarray::{Array1, ArrayView1, ArrayView2, ArrayViewMut1};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activations::Activation;
use crate::error::{MinervaError, Result};
use crate::layers::{DenseLayer, Layer, LayerKind, Trainable, TrainingLayer};
use crate::persistence;

/// Declares the structure of one layer used to create a network.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LayerConfig {
    /// The number of neurons (outputs) in the layer.
    pub nbr_outputs: usize,
    /// The activation function to use in this layer.
    pub activation: Activation,
    /// Symmetric bound for uniform random initialization of the layer's
    /// weights and biases.
    pub initial_weight_range: f64,
}

impl LayerConfig {
    pub fn new(nbr_outputs: usize, activation: Activation, initial_weight_range: f64) -> Self {
        LayerConfig {
            nbr_outputs,
            activation,
            initial_weight_range,
        }
    }
}

/// An ordered stack of fully-connected layers.
///
/// Each layer's output width equals the next layer's input width, enforced
/// at construction. A network built with [`Network::new`] holds
/// training-capable layers; one restored with [`Network::load`] holds
/// inference-only layers and rejects training with a usage-mode error.
pub struct Network {
    layers: Vec<LayerKind>,
    nbr_inputs: usize,
    nbr_outputs: usize,
}

impl Network {
    /// Build a training-capable network from layer configurations.
    ///
    /// Each layer's weights and biases are drawn uniformly from the config's
    /// `[-initial_weight_range, +initial_weight_range]` using the supplied
    /// random source; layers are initialized in order, so reproducibility
    /// requires a fixed seed and this exact consumption order.
    pub fn new<R: Rng>(
        nbr_inputs: usize,
        layer_configs: &[LayerConfig],
        rng: &mut R,
    ) -> Result<Self> {
        if nbr_inputs < 1 {
            return Err(MinervaError::invalid_parameter(
                "nbr_inputs",
                "network input width must be at least 1",
            ));
        }
        if layer_configs.is_empty() {
            return Err(MinervaError::invalid_parameter(
                "layer_configs",
                "network must have at least one layer",
            ));
        }

        let mut layers = Vec::with_capacity(layer_configs.len());
        let mut width = nbr_inputs;
        for config in layer_configs {
            let layer = TrainingLayer::new(
                width,
                config.nbr_outputs,
                config.activation,
                config.initial_weight_range,
                rng,
            )?;
            // The outputs of one layer become the inputs to the next layer.
            width = config.nbr_outputs;
            layers.push(LayerKind::Training(layer));
        }

        Ok(Network {
            layers,
            nbr_inputs,
            nbr_outputs: width,
        })
    }

    /// The network's input width (the first layer's input count).
    pub fn nbr_inputs(&self) -> usize {
        self.nbr_inputs
    }

    /// The network's output width (the last layer's output count).
    pub fn nbr_outputs(&self) -> usize {
        self.nbr_outputs
    }

    /// The layer stack, in forward order.
    pub fn layers(&self) -> &[LayerKind] {
        &self.layers
    }

    /// Mutable access to the layer stack, for callers that perturb
    /// parameters directly (e.g. a genetic-algorithm mutation step).
    pub fn layers_mut(&mut self) -> &mut [LayerKind] {
        &mut self.layers
    }

    /// Feed one input vector through all layers and return the final output.
    ///
    /// Mutates only the layers' scratch buffers; the returned view borrows
    /// the last layer's preallocated output buffer.
    pub fn forward(&mut self, inputs: ArrayView1<f64>) -> Result<ArrayView1<f64>> {
        if inputs.len() != self.nbr_inputs {
            return Err(MinervaError::dimension_mismatch(
                format!("{} inputs", self.nbr_inputs),
                format!("{} inputs", inputs.len()),
            ));
        }

        for i in 0..self.layers.len() {
            let (prev, rest) = self.layers.split_at_mut(i);
            if i == 0 {
                rest[0].compute_outputs(inputs.view())?;
            } else {
                rest[0].compute_outputs(prev[i - 1].outputs())?;
            }
        }

        match self.layers.last() {
            Some(layer) => Ok(layer.outputs()),
            None => Err(MinervaError::invalid_parameter(
                "layers",
                "network has no layers",
            )),
        }
    }

    /// Train with per-sample stochastic gradient descent and momentum.
    ///
    /// Runs exactly `nbr_epochs` epochs; there is no convergence criterion.
    /// Each epoch visits every sample once in a freshly shuffled order drawn
    /// from `rng`. Per sample: forward pass, then the caller-supplied
    /// `compute_errors(targets, outputs, errors)` fills the per-output error
    /// vector, then the backward sweep runs from the last layer to the first
    /// (errors propagated, then that layer updated, before moving on).
    ///
    /// Fails with a usage-mode error when the network was loaded for
    /// inference only.
    #[allow(clippy::too_many_arguments)]
    pub fn train<R, F>(
        &mut self,
        training_inputs: ArrayView2<f64>,
        training_targets: ArrayView2<f64>,
        nbr_epochs: usize,
        rate: f64,
        momentum: f64,
        rng: &mut R,
        mut compute_errors: F,
    ) -> Result<()>
    where
        R: Rng,
        F: FnMut(ArrayView1<f64>, ArrayView1<f64>, ArrayViewMut1<f64>),
    {
        self.check_samples(&training_inputs, &training_targets)?;
        for layer in &self.layers {
            layer.as_trainable()?;
        }

        let mut errors = Array1::<f64>::zeros(self.nbr_outputs);
        let mut order: Vec<usize> = (0..training_inputs.nrows()).collect();

        for _ in 0..nbr_epochs {
            order.shuffle(rng);

            for &i in &order {
                let outputs = self.forward(training_inputs.row(i))?;
                compute_errors(training_targets.row(i), outputs, errors.view_mut());
                self.backward(errors.view(), rate, momentum)?;
            }
        }
        Ok(())
    }

    /// Run the forward pass for every testing sample and hand
    /// `(index, inputs, targets, outputs)` to the callback.
    ///
    /// Does not mutate weights, so it works in both operating modes.
    pub fn test<F>(
        &mut self,
        testing_inputs: ArrayView2<f64>,
        testing_targets: ArrayView2<f64>,
        mut on_sample: F,
    ) -> Result<()>
    where
        F: FnMut(usize, ArrayView1<f64>, ArrayView1<f64>, ArrayView1<f64>),
    {
        self.check_samples(&testing_inputs, &testing_targets)?;

        for i in 0..testing_inputs.nrows() {
            let outputs = self.forward(testing_inputs.row(i))?;
            on_sample(i, testing_inputs.row(i), testing_targets.row(i), outputs);
        }
        Ok(())
    }

    /// One backward sweep, last layer to first.
    ///
    /// A layer's errors are propagated through its own weights before that
    /// layer updates them, and each layer is fully updated before the sweep
    /// moves toward the input. Changing this order silently corrupts the
    /// gradient, so it is pinned by a regression test.
    fn backward(&mut self, errors: ArrayView1<f64>, rate: f64, momentum: f64) -> Result<()> {
        for l in (0..self.layers.len()).rev() {
            let (head, tail) = self.layers.split_at_mut(l + 1);
            let layer = head[l].as_trainable_mut()?;

            match tail.first() {
                // Inner layers receive the errors the next layer propagated.
                Some(next) => layer.compute_errors(next.as_trainable()?.errors_out())?,
                // The last layer receives the injected error vector.
                None => layer.compute_errors(errors.view())?,
            }
            layer.update(rate, momentum);
        }
        Ok(())
    }

    fn check_samples(&self, inputs: &ArrayView2<f64>, targets: &ArrayView2<f64>) -> Result<()> {
        if inputs.nrows() != targets.nrows() {
            return Err(MinervaError::dimension_mismatch(
                format!("{} target rows", inputs.nrows()),
                format!("{} target rows", targets.nrows()),
            ));
        }
        if inputs.ncols() != self.nbr_inputs {
            return Err(MinervaError::dimension_mismatch(
                format!("{} input columns", self.nbr_inputs),
                format!("{} input columns", inputs.ncols()),
            ));
        }
        if targets.ncols() != self.nbr_outputs {
            return Err(MinervaError::dimension_mismatch(
                format!("{} target columns", self.nbr_outputs),
                format!("{} target columns", targets.ncols()),
            ));
        }
        Ok(())
    }

    /// Persist topology and parameters to a file.
    ///
    /// The file handle is scoped to this call and released on every path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = fs::File::create(path)?;
        self.save_to(&mut file)
    }

    /// Persist topology and parameters to any writer.
    ///
    /// Layout: `i32` layer count, `i32` first-layer input count, then per
    /// layer an `i32` output count, the activation identifier, the weight
    /// matrix row-major, and the bias vector.
    pub fn save_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        persistence::write_i32(writer, self.layers.len() as i32)?;
        persistence::write_i32(writer, self.nbr_inputs as i32)?;

        for layer in &self.layers {
            persistence::write_i32(writer, layer.output_size() as i32)?;
            persistence::write_string(writer, &layer.activation().name())?;
            layer.dense().write_params(writer)?;
        }
        Ok(())
    }

    /// Restore an inference-only network from a file, resolving activation
    /// identifiers through the built-in registry.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_resolver(path, Activation::resolve)
    }

    /// Restore an inference-only network from a file with a caller-supplied
    /// activation resolver.
    pub fn load_with_resolver<P, F>(path: P, resolver: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<Activation>,
    {
        let mut file = fs::File::open(path)?;
        Self::load_from(&mut file, resolver)
    }

    /// Restore an inference-only network from any reader.
    ///
    /// Fails on a truncated stream, a malformed header, or an identifier the
    /// resolver does not know; no partial network is ever returned.
    pub fn load_from<R, F>(reader: &mut R, resolver: F) -> Result<Self>
    where
        R: Read,
        F: Fn(&str) -> Option<Activation>,
    {
        let layer_count = persistence::read_count(reader, "layer count")?;
        let nbr_inputs = persistence::read_count(reader, "first layer input count")?;

        let mut layers = Vec::with_capacity(layer_count);
        let mut width = nbr_inputs;
        for _ in 0..layer_count {
            let nbr_outputs = persistence::read_count(reader, "layer output count")?;
            let name = persistence::read_string(reader)?;
            let activation =
                resolver(&name).ok_or(MinervaError::UnknownActivation { name })?;

            let mut layer = DenseLayer::new(width, nbr_outputs, activation)?;
            layer.read_params(reader)?;
            layers.push(LayerKind::Inference(layer));
            width = nbr_outputs;
        }

        Ok(Network {
            layers,
            nbr_inputs,
            nbr_outputs: width,
        })
    }
}
