//! Builder pattern for convenient network construction.

pub mod network;

pub use network::NetworkBuilder;
