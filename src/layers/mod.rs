//! Neural network layers in two variants sharing one contract: a
//! training-capable layer that keeps gradient and momentum state, and an
//! inference-only layer that keeps just enough for forward evaluation.

pub mod dense;
pub mod training;
pub mod traits;

use ndarray::{Array1, Array2, ArrayView1};

use crate::activations::Activation;
use crate::error::{MinervaError, Result};

pub use dense::DenseLayer;
pub use training::TrainingLayer;
pub use traits::{Layer, Trainable};

/// A layer in either operating mode.
///
/// Networks built for training hold `Training` layers; networks restored
/// from persisted state hold `Inference` layers. Backward-pass operations
/// requested on an `Inference` layer surface a usage-mode error instead of
/// silently doing nothing.
pub enum LayerKind {
    Training(TrainingLayer),
    Inference(DenseLayer),
}

impl LayerKind {
    /// The inference view of the layer, whichever mode it is in.
    pub fn dense(&self) -> &DenseLayer {
        match self {
            LayerKind::Training(layer) => layer.dense(),
            LayerKind::Inference(layer) => layer,
        }
    }

    /// Mutable inference view of the layer.
    pub fn dense_mut(&mut self) -> &mut DenseLayer {
        match self {
            LayerKind::Training(layer) => layer.dense_mut(),
            LayerKind::Inference(layer) => layer,
        }
    }

    /// The layer as a training layer, or a usage-mode error.
    pub fn as_trainable(&self) -> Result<&TrainingLayer> {
        match self {
            LayerKind::Training(layer) => Ok(layer),
            LayerKind::Inference(_) => Err(MinervaError::NotTrainable(
                "backward pass requested on an inference-only layer".to_string(),
            )),
        }
    }

    /// Mutable training view of the layer, or a usage-mode error.
    pub fn as_trainable_mut(&mut self) -> Result<&mut TrainingLayer> {
        match self {
            LayerKind::Training(layer) => Ok(layer),
            LayerKind::Inference(_) => Err(MinervaError::NotTrainable(
                "backward pass requested on an inference-only layer".to_string(),
            )),
        }
    }
}

impl Layer for LayerKind {
    fn compute_outputs(&mut self, inputs: ArrayView1<f64>) -> Result<()> {
        match self {
            LayerKind::Training(layer) => layer.compute_outputs(inputs),
            LayerKind::Inference(layer) => layer.compute_outputs(inputs),
        }
    }

    fn outputs(&self) -> ArrayView1<f64> {
        self.dense().outputs()
    }

    fn input_size(&self) -> usize {
        self.dense().input_size()
    }

    fn output_size(&self) -> usize {
        self.dense().output_size()
    }

    fn activation(&self) -> Activation {
        self.dense().activation()
    }

    fn weights(&self) -> &Array2<f64> {
        self.dense().weights()
    }

    fn biases(&self) -> &Array1<f64> {
        self.dense().biases()
    }

    fn weights_mut(&mut self) -> &mut Array2<f64> {
        self.dense_mut().weights_mut()
    }

    fn biases_mut(&mut self) -> &mut Array1<f64> {
        self.dense_mut().biases_mut()
    }
}
