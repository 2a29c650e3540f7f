use ndarray::linalg::general_mat_vec_mul;
use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;

use crate::activations::Activation;
use crate::error::{MinervaError, Result};
use crate::layers::dense::DenseLayer;
use crate::layers::traits::{Layer, Trainable};

/// The training-capable layer variant.
///
/// Owns a [`DenseLayer`] (composition, not inheritance) plus the scratch
/// state the backward pass needs: the cached input vector, per-neuron
/// derivatives and signals, previous-delta buffers for momentum, and the
/// error vector propagated to the previous layer. Every buffer is allocated
/// once at construction and reused across calls.
pub struct TrainingLayer {
    base: DenseLayer,
    inputs: Array1<f64>,       // Ni, cached by the forward pass for the update
    derivatives: Array1<f64>,  // No
    signals: Array1<f64>,      // No
    prev_delta_w: Array2<f64>, // No x Ni, momentum carry-over
    prev_delta_b: Array1<f64>, // No
    errors_out: Array1<f64>,   // Ni
}

impl TrainingLayer {
    /// Create a training layer with weights and biases drawn uniformly from
    /// `[-initial_weight_range, +initial_weight_range]`.
    pub fn new<R: Rng>(
        nbr_inputs: usize,
        nbr_outputs: usize,
        activation: Activation,
        initial_weight_range: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let base = DenseLayer::random(nbr_inputs, nbr_outputs, activation, initial_weight_range, rng)?;
        Ok(Self::from_dense(base))
    }

    /// Wrap an existing dense layer with freshly zeroed training scratch.
    pub fn from_dense(base: DenseLayer) -> Self {
        let nbr_inputs = base.input_size();
        let nbr_outputs = base.output_size();
        TrainingLayer {
            base,
            inputs: Array1::zeros(nbr_inputs),
            derivatives: Array1::zeros(nbr_outputs),
            signals: Array1::zeros(nbr_outputs),
            prev_delta_w: Array2::zeros((nbr_outputs, nbr_inputs)),
            prev_delta_b: Array1::zeros(nbr_outputs),
            errors_out: Array1::zeros(nbr_inputs),
        }
    }

    /// The wrapped inference layer.
    pub fn dense(&self) -> &DenseLayer {
        &self.base
    }

    /// Mutable access to the wrapped inference layer.
    pub fn dense_mut(&mut self) -> &mut DenseLayer {
        &mut self.base
    }
}

impl Layer for TrainingLayer {
    fn compute_outputs(&mut self, inputs: ArrayView1<f64>) -> Result<()> {
        if inputs.len() != self.input_size() {
            return Err(MinervaError::dimension_mismatch(
                format!("{} inputs", self.input_size()),
                format!("{} inputs", inputs.len()),
            ));
        }
        // Cache the raw inputs; update() needs them for the weight gradients.
        self.inputs.assign(&inputs);
        self.base.compute_outputs(inputs)
    }

    fn outputs(&self) -> ArrayView1<f64> {
        self.base.outputs()
    }

    fn input_size(&self) -> usize {
        self.base.input_size()
    }

    fn output_size(&self) -> usize {
        self.base.output_size()
    }

    fn activation(&self) -> Activation {
        self.base.activation()
    }

    fn weights(&self) -> &Array2<f64> {
        self.base.weights()
    }

    fn biases(&self) -> &Array1<f64> {
        self.base.biases()
    }

    fn weights_mut(&mut self) -> &mut Array2<f64> {
        self.base.weights_mut()
    }

    fn biases_mut(&mut self) -> &mut Array1<f64> {
        self.base.biases_mut()
    }
}

impl Trainable for TrainingLayer {
    fn compute_errors(&mut self, errors_in: ArrayView1<f64>) -> Result<()> {
        if errors_in.len() != self.output_size() {
            return Err(MinervaError::dimension_mismatch(
                format!("{} errors", self.output_size()),
                format!("{} errors", errors_in.len()),
            ));
        }

        let activation = self.base.activation;
        for k in 0..self.output_size() {
            self.derivatives[k] = activation.derivative(self.base.nets[k], self.base.outputs[k]);
            self.signals[k] = errors_in[k] * self.derivatives[k];
        }

        // errors_out[j] = sum_k weights[k][j] * signals[k], through the
        // current (not yet updated) weight matrix.
        general_mat_vec_mul(
            1.0,
            &self.base.weights.t(),
            &self.signals,
            0.0,
            &mut self.errors_out,
        );
        Ok(())
    }

    fn errors_out(&self) -> ArrayView1<f64> {
        self.errors_out.view()
    }

    fn update(&mut self, rate: f64, momentum: f64) {
        for k in 0..self.base.weights.nrows() {
            let signal = self.signals[k];

            // Bias gradient is the signal itself.
            let delta_b = rate * signal;
            self.base.biases[k] += delta_b + momentum * self.prev_delta_b[k];
            self.prev_delta_b[k] = delta_b;

            for j in 0..self.base.weights.ncols() {
                let delta = rate * signal * self.inputs[j];
                self.base.weights[[k, j]] += delta + momentum * self.prev_delta_w[[k, j]];
                self.prev_delta_w[[k, j]] = delta;
            }
        }
    }
}
