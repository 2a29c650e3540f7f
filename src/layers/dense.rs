use std::io::{Read, Write};

use ndarray::linalg::general_mat_vec_mul;
use ndarray::{Array1, Array2, ArrayView1, Zip};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;

use crate::activations::Activation;
use crate::error::{MinervaError, Result};
use crate::layers::traits::Layer;
use crate::persistence;

/// A fully connected layer holding only what forward evaluation needs.
///
/// This is the inference-only variant: weights, biases, the activation
/// function, and two preallocated scratch buffers (pre-activation nets and
/// post-activation outputs). It keeps no input cache and therefore cannot
/// back-propagate; the training variant composes one of these and adds the
/// gradient state on top.
pub struct DenseLayer {
    /// Weight matrix of shape `(nbr_outputs, nbr_inputs)`, row-major as persisted.
    pub weights: Array2<f64>,
    pub biases: Array1<f64>,
    pub activation: Activation,
    pub(crate) nets: Array1<f64>,
    pub(crate) outputs: Array1<f64>,
}

impl DenseLayer {
    /// Create a layer with zeroed weights and biases.
    ///
    /// Used by the load path, which fills the parameters from persisted
    /// state immediately afterwards. Both widths must be at least 1.
    pub fn new(nbr_inputs: usize, nbr_outputs: usize, activation: Activation) -> Result<Self> {
        if nbr_inputs < 1 {
            return Err(MinervaError::invalid_parameter(
                "nbr_inputs",
                "layer input width must be at least 1",
            ));
        }
        if nbr_outputs < 1 {
            return Err(MinervaError::invalid_parameter(
                "nbr_outputs",
                "layer output width must be at least 1",
            ));
        }
        Ok(DenseLayer {
            weights: Array2::zeros((nbr_outputs, nbr_inputs)),
            biases: Array1::zeros(nbr_outputs),
            activation,
            nets: Array1::zeros(nbr_outputs),
            outputs: Array1::zeros(nbr_outputs),
        })
    }

    /// Create a layer with weights and biases drawn uniformly from
    /// `[-initial_weight_range, +initial_weight_range]`.
    pub fn random<R: Rng>(
        nbr_inputs: usize,
        nbr_outputs: usize,
        activation: Activation,
        initial_weight_range: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let mut layer = Self::new(nbr_inputs, nbr_outputs, activation)?;
        layer.reset(initial_weight_range, rng)?;
        Ok(layer)
    }

    /// Redraw every weight and bias uniformly from `[-range, +range]`.
    ///
    /// Reproducible only when the random source is seeded identically and
    /// consumed in the same order.
    pub fn reset<R: Rng>(&mut self, range: f64, rng: &mut R) -> Result<()> {
        if !range.is_finite() || range <= 0.0 {
            return Err(MinervaError::invalid_parameter(
                "initial_weight_range",
                "must be finite and greater than zero",
            ));
        }
        let dist = Uniform::new_inclusive(-range, range);
        self.weights = Array2::random_using(self.weights.dim(), dist, rng);
        self.biases = Array1::random_using(self.biases.len(), dist, rng);
        Ok(())
    }

    pub fn with_weights(mut self, weights: Array2<f64>) -> Self {
        assert_eq!(weights.dim(), self.weights.dim());
        self.weights = weights;
        self
    }

    pub fn with_biases(mut self, biases: Array1<f64>) -> Self {
        assert_eq!(biases.dim(), self.biases.dim());
        self.biases = biases;
        self
    }

    /// Serialize weights (row-major) then biases. Topology and activation
    /// identity are written one level up by the network.
    pub fn write_params<W: Write>(&self, writer: &mut W) -> Result<()> {
        for &v in self.weights.iter() {
            persistence::write_f64(writer, v)?;
        }
        for &v in self.biases.iter() {
            persistence::write_f64(writer, v)?;
        }
        Ok(())
    }

    /// Deserialize weights (row-major) then biases, in the same fixed order
    /// as [`DenseLayer::write_params`].
    pub fn read_params<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        for v in self.weights.iter_mut() {
            *v = persistence::read_f64(reader)?;
        }
        for v in self.biases.iter_mut() {
            *v = persistence::read_f64(reader)?;
        }
        Ok(())
    }
}

impl Layer for DenseLayer {
    fn compute_outputs(&mut self, inputs: ArrayView1<f64>) -> Result<()> {
        if inputs.len() != self.input_size() {
            return Err(MinervaError::dimension_mismatch(
                format!("{} inputs", self.input_size()),
                format!("{} inputs", inputs.len()),
            ));
        }

        // nets = weights . inputs + biases, written into the scratch buffer.
        general_mat_vec_mul(1.0, &self.weights, &inputs, 0.0, &mut self.nets);
        self.nets += &self.biases;

        let activation = self.activation;
        Zip::from(&mut self.outputs)
            .and(&self.nets)
            .for_each(|out, &net| *out = activation.compute(net));

        self.activation.post_process(&mut self.outputs);
        Ok(())
    }

    fn outputs(&self) -> ArrayView1<f64> {
        self.outputs.view()
    }

    fn input_size(&self) -> usize {
        self.weights.ncols()
    }

    fn output_size(&self) -> usize {
        self.weights.nrows()
    }

    fn activation(&self) -> Activation {
        self.activation
    }

    fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    fn biases(&self) -> &Array1<f64> {
        &self.biases
    }

    fn weights_mut(&mut self) -> &mut Array2<f64> {
        &mut self.weights
    }

    fn biases_mut(&mut self) -> &mut Array1<f64> {
        &mut self.biases
    }
}
