//! # Activation Functions Module
//!
//! This module provides the activation functions used by network layers.
//! Each function is a pure scalar transform plus an optional vector-level
//! post-processing step applied once over a layer's full output.
//!
//! ## Available Activations
//!
//! - **Linear**: Identity function - no transformation
//! - **ReLU** (Rectified Linear Unit): `max(0, x)`
//! - **ParametricReLU**: ReLU with a configurable negative slope
//! - **Sigmoid**: `1 / (1 + e^(-x))` - outputs between 0 and 1, computed
//!   with a sign branch so extreme inputs never overflow
//! - **Tanh**: Hyperbolic tangent - clamped to ±1 for `|x| > 20`
//! - **SoftMax**: normalization deferred entirely to the post-processing
//!   step, with the maximum subtracted before exponentiating
//!
//! ## Usage Example
//!
//! ```rust
//! use minerva::activations::Activation;
//! use ndarray::array;
//!
//! let softmax = Activation::Softmax;
//! let mut outputs = array![1.0, 2.0, 3.0];
//! softmax.post_process(&mut outputs);
//! assert!((outputs.sum() - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Persistence Identifiers
//!
//! Every variant carries a stable string identifier (see
//! [`Activation::name`]) used by the binary persistence format. Identifiers
//! are resolved back to variants at load time through
//! [`Activation::resolve`] or a caller-supplied resolver.

pub mod functions;

pub use functions::Activation;
