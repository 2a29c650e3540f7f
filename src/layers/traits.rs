use ndarray::{Array1, Array2, ArrayView1};

use crate::activations::Activation;
use crate::error::Result;

/// Forward-evaluation contract shared by every layer variant.
pub trait Layer {
    /// Compute the layer's outputs for one input vector.
    ///
    /// Fails with a dimension-mismatch error when `inputs.len()` does not
    /// equal the layer's configured input width. The result is written into
    /// the layer's preallocated output buffer, readable through
    /// [`Layer::outputs`].
    fn compute_outputs(&mut self, inputs: ArrayView1<f64>) -> Result<()>;

    /// The output vector produced by the most recent forward pass.
    fn outputs(&self) -> ArrayView1<f64>;

    /// Number of input features the layer expects.
    fn input_size(&self) -> usize;

    /// Number of neurons (outputs) in the layer.
    fn output_size(&self) -> usize;

    /// The layer's activation function.
    fn activation(&self) -> Activation;

    /// Get reference to the weight matrix, shaped `(output_size, input_size)`.
    fn weights(&self) -> &Array2<f64>;

    /// Get reference to the bias vector.
    fn biases(&self) -> &Array1<f64>;

    /// Get mutable reference to the weight matrix.
    fn weights_mut(&mut self) -> &mut Array2<f64>;

    /// Get mutable reference to the bias vector.
    fn biases_mut(&mut self) -> &mut Array1<f64>;
}

/// Backward-pass capability, implemented only by the training layer variant.
pub trait Trainable: Layer {
    /// Back-propagate the error vector arriving at this layer's outputs.
    ///
    /// Must be called after [`Layer::compute_outputs`] and before
    /// [`Trainable::update`] in the same backward sweep so the propagated
    /// errors go through the not-yet-updated weight matrix.
    fn compute_errors(&mut self, errors_in: ArrayView1<f64>) -> Result<()>;

    /// The errors propagated toward the previous layer, one per input.
    fn errors_out(&self) -> ArrayView1<f64>;

    /// Apply the per-sample weight and bias update with momentum.
    fn update(&mut self, rate: f64, momentum: f64);
}
