use rand::Rng;

use crate::activations::Activation;
use crate::error::{MinervaError, Result};
use crate::network::{LayerConfig, Network};

/// Builder for constructing training-capable networks with a fluent API.
pub struct NetworkBuilder {
    configs: Vec<LayerConfig>,
}

impl NetworkBuilder {
    /// Create a new network builder
    pub fn new() -> Self {
        NetworkBuilder {
            configs: Vec::new(),
        }
    }

    /// Add a fully-connected layer to the network
    pub fn add_layer(
        mut self,
        nbr_outputs: usize,
        activation: Activation,
        initial_weight_range: f64,
    ) -> Self {
        self.configs
            .push(LayerConfig::new(nbr_outputs, activation, initial_weight_range));
        self
    }

    /// Add a sequence of layers sharing one activation and weight range
    pub fn add_layers(
        mut self,
        layer_sizes: &[usize],
        activation: Activation,
        initial_weight_range: f64,
    ) -> Self {
        for &nbr_outputs in layer_sizes {
            self.configs
                .push(LayerConfig::new(nbr_outputs, activation, initial_weight_range));
        }
        self
    }

    /// Build the network, initializing weights from the supplied random source
    pub fn build<R: Rng>(self, nbr_inputs: usize, rng: &mut R) -> Result<Network> {
        if self.configs.is_empty() {
            return Err(MinervaError::invalid_parameter(
                "layers",
                "network must have at least one layer",
            ));
        }
        Network::new(nbr_inputs, &self.configs, rng)
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
