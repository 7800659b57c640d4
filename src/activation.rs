//! Handling of neuron activation functions.

use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents which activation function to use when evaluating neurons.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Activation {
    /// Logistic function. Outputs `1 / (1 + exp(-x))`.
    Sigmoid,
    /// Hyperbolic tangent function. Outputs `tanh(x)`.
    Tanh,
    /// Identity function. Outputs `x`.
    Linear,
}

impl Default for Activation {
    fn default() -> Self {
        Activation::Sigmoid
    }
}

impl Activation {
    /// Applies the activation function to the input.
    pub fn apply<T: Float>(&self, x: T) -> T {
        match self {
            Activation::Sigmoid => sigmoid(x),
            Activation::Tanh => tanh(x),
            Activation::Linear => linear(x),
        }
    }

    /// Returns the derivative of the activation function, expressed in terms of its output `y`.
    pub fn derivative<T: Float>(&self, y: T) -> T {
        match self {
            Activation::Sigmoid => dsigmoid(y),
            Activation::Tanh => dtanh(y),
            Activation::Linear => dlinear(y),
        }
    }

    /// Returns the corresponding function to the `Activation`.
    pub fn get_function<T: Float>(&self) -> fn(T) -> T {
        match self {
            Activation::Sigmoid => sigmoid,
            Activation::Tanh => tanh,
            Activation::Linear => linear,
        }
    }
}

/// The activation functions used for the hidden and output layers during a single pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Activations {
    pub hidden: Activation,
    pub output: Activation,
}

impl Activations {
    pub fn new(hidden: Activation, output: Activation) -> Self {
        Self { hidden, output }
    }
}

/// Outputs `x`.
pub fn linear<T>(x: T) -> T {
    x
}

/// Derivative of the identity function. Outputs `1`.
pub fn dlinear<T: Float>(_y: T) -> T {
    T::one()
}

/// Logistic function. Outputs `1 / (1 + exp(-x))`.
pub fn sigmoid<T: Float>(x: T) -> T {
    T::one() / (T::one() + (-x).exp())
}

/// Derivative of the logistic function given its output `y`. Outputs `y * (1 - y)`.
pub fn dsigmoid<T: Float>(y: T) -> T {
    y * (T::one() - y)
}

/// Outputs `tanh(x)`.
pub fn tanh<T: Float>(x: T) -> T {
    x.tanh()
}

/// Derivative of the hyperbolic tangent given its output `y`. Outputs `1 - y^2`.
pub fn dtanh<T: Float>(y: T) -> T {
    T::one() - y * y
}

/// Clamps `x` into `[0, 1]`.
pub fn normalize<T: Float>(x: T) -> T {
    if x > T::one() {
        T::one()
    } else if x < T::zero() {
        T::zero()
    } else {
        x
    }
}
