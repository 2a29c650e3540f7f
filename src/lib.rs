//! # Minerva - A Small Feed-Forward Network Trainer
//!
//! Minerva is a Rust library for training and evaluating fully-connected
//! feed-forward networks with sample-by-sample backpropagation and momentum.
//! It is designed to be embedded into larger pipelines (for example a
//! hyperparameter search loop) that build a network, train it, and read back
//! a scalar score.
//!
//! ## Key Features
//!
//! - **Layered engine**: an ordered stack of fully-connected layers with
//!   preallocated scratch buffers and no per-call allocation
//! - **Two operating modes**: training-capable layers with gradient and
//!   momentum state, and lighter inference-only layers sharing one contract
//! - **Stochastic training**: per-sample gradient descent with momentum and
//!   a shuffled sample order each epoch
//! - **Compact persistence**: a little-endian binary format that round-trips
//!   topology and parameters exactly, with activation functions resolved by
//!   a stable string identifier at load time
//! - **Explicit randomness**: every constructor and training call takes the
//!   random source as an argument; there is no global RNG state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use minerva::network::{Network, LayerConfig};
//! use minerva::activations::Activation;
//! use ndarray::array;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! // Two inputs, one hidden layer of eight tanh neurons, one linear output.
//! let configs = [
//!     LayerConfig::new(8, Activation::Tanh, 0.5),
//!     LayerConfig::new(1, Activation::Linear, 0.5),
//! ];
//! let mut network = Network::new(2, &configs, &mut rng).unwrap();
//!
//! let inputs = array![[0.0, 1.0], [1.0, 0.0]];
//! let targets = array![[1.0], [1.0]];
//!
//! network.train(inputs.view(), targets.view(), 200, 0.05, 0.9, &mut rng,
//!     |targets, outputs, mut errors| {
//!         for k in 0..errors.len() {
//!             errors[k] = targets[k] - outputs[k];
//!         }
//!     }).unwrap();
//!
//! network.save("trained.net").unwrap();
//! ```
//!
//! ## Module Organization
//!
//! - [`activations`] - Activation functions (Linear, ReLU, Sigmoid, Tanh, SoftMax, ...)
//! - [`builders`] - Builder pattern for convenient network construction
//! - [`error`] - Error types and result handling
//! - [`layers`] - Dense layers in training and inference-only variants
//! - [`network`] - The layered network engine and its persistence codec

pub mod activations;
pub mod builders;
pub mod error;
pub mod layers;
pub mod network;

mod persistence;

#[cfg(test)]
mod tests;
