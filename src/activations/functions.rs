use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// An enumeration of the activation functions that can be used in a network layer.
///
/// `compute` and `derivative` must stay consistent: functions whose
/// closed-form derivative is expressed in terms of the activation output
/// (sigmoid, tanh, softmax) read the `f_of_x` argument, the others read the
/// pre-activation `x`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    ParametricRelu { alpha: f64 },
    Sigmoid,
    Tanh,
    Softmax,
}

impl Activation {
    /// Compute the activation for a single pre-activation value.
    ///
    /// SoftMax returns `x` unchanged here; its normalization happens in
    /// [`Activation::post_process`] so the max can be subtracted first.
    pub fn compute(&self, x: f64) -> f64 {
        match self {
            Activation::Linear => x,
            Activation::Relu => {
                if x < 0.0 {
                    0.0
                } else {
                    x
                }
            }
            Activation::ParametricRelu { alpha } => {
                if x < 0.0 {
                    alpha * x
                } else {
                    x
                }
            }
            Activation::Sigmoid => {
                // Branch on the sign of x so exp never overflows.
                if x < 0.0 {
                    let e = x.exp();
                    e / (1.0 + e)
                } else {
                    1.0 / (1.0 + (-x).exp())
                }
            }
            Activation::Tanh => {
                if x < -20.0 {
                    -1.0
                } else if x > 20.0 {
                    1.0
                } else {
                    x.tanh()
                }
            }
            Activation::Softmax => x,
        }
    }

    /// Compute the derivative at the pre-activation value `x`.
    ///
    /// `f_of_x` is the post-activation (and post-processed) output for the
    /// same neuron; sigmoid, tanh and softmax use it directly.
    pub fn derivative(&self, x: f64, f_of_x: f64) -> f64 {
        match self {
            Activation::Linear => 1.0,
            Activation::Relu => {
                if x < 0.0 {
                    0.0
                } else {
                    1.0
                }
            }
            Activation::ParametricRelu { alpha } => {
                if x < 0.0 {
                    *alpha
                } else {
                    1.0
                }
            }
            Activation::Sigmoid => f_of_x * (1.0 - f_of_x),
            Activation::Tanh => 1.0 - f_of_x * f_of_x,
            Activation::Softmax => (1.0 - f_of_x) * f_of_x,
        }
    }

    /// Vector-level transform applied once after every element of a layer's
    /// output has been computed. A no-op for everything except SoftMax.
    ///
    /// SoftMax subtracts the maximum before exponentiating, then divides by
    /// the sum of exponentials. The result sums to 1.0 for any finite input
    /// of length >= 1; an empty vector is left untouched.
    pub fn post_process(&self, values: &mut Array1<f64>) {
        if let Activation::Softmax = self {
            if values.is_empty() {
                return;
            }
            let max = values.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
            values.mapv_inplace(|v| (v - max).exp());
            let sum = values.sum();
            *values /= sum;
        }
    }

    /// Stable string identifier used by the binary persistence format.
    ///
    /// The parametric variant embeds its slope in the identifier so a
    /// persisted network restores with the exact same parameter.
    pub fn name(&self) -> String {
        match self {
            Activation::Linear => "Linear".to_string(),
            Activation::Relu => "ReLU".to_string(),
            Activation::ParametricRelu { alpha } => format!("ParametricReLU({})", alpha),
            Activation::Sigmoid => "Sigmoid".to_string(),
            Activation::Tanh => "Tanh".to_string(),
            Activation::Softmax => "SoftMax".to_string(),
        }
    }

    /// Resolve a persisted identifier back to a concrete variant.
    ///
    /// This is the registration table consulted during `load`; unknown
    /// identifiers yield `None` and the load fails without constructing a
    /// partial network.
    pub fn resolve(name: &str) -> Option<Activation> {
        match name {
            "Linear" => Some(Activation::Linear),
            "ReLU" => Some(Activation::Relu),
            "Sigmoid" => Some(Activation::Sigmoid),
            "Tanh" => Some(Activation::Tanh),
            "SoftMax" => Some(Activation::Softmax),
            _ => {
                let alpha = name
                    .strip_prefix("ParametricReLU(")?
                    .strip_suffix(')')?
                    .parse()
                    .ok()?;
                Some(Activation::ParametricRelu { alpha })
            }
        }
    }
}
