//! The error type for configuring and running networks.

use std::{error, fmt};

/// The reason why an argument to a [`Network`][super::Network] was rejected.
///
/// Every check happens before the network is modified, so a returned error leaves the network
/// exactly as it was.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The network must have at least one input and one output. Contains the requested input
    /// and output counts.
    InvalidTopology { inputs: usize, outputs: usize },
    /// The input vector has the wrong length.
    InvalidInputCount { expected: usize, found: usize },
    /// The target vector has the wrong length.
    InvalidTargetCount { expected: usize, found: usize },
    /// The externally supplied hidden activations have the wrong length.
    InvalidHiddenCount { expected: usize, found: usize },
    /// A noise vector has the wrong length. Contains the name of the layer it applies to.
    InvalidNoiseCount {
        layer: &'static str,
        expected: usize,
        found: usize,
    },
    /// The flat weight vector has the wrong length.
    InvalidWeightCount { expected: usize, found: usize },
    /// A context buffer has the wrong length. Contains the index of the buffer.
    InvalidContextSize {
        index: usize,
        expected: usize,
        found: usize,
    },
    /// The dropout rate is not in `[0, 1)`.
    InvalidDropoutRate(f64),
    /// The amplitude of random noise is NaN, infinite, or too large to sample from.
    InvalidNoiseAmplitude(f64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidTopology { inputs, outputs } => write!(
                f,
                "invalid topology: {} inputs and {} outputs (both must be positive)",
                inputs, outputs
            ),
            Self::InvalidInputCount { expected, found } => {
                write!(f, "wrong number of inputs: expected {}, found {}", expected, found)
            }
            Self::InvalidTargetCount { expected, found } => write!(
                f,
                "wrong number of target values: expected {}, found {}",
                expected, found
            ),
            Self::InvalidHiddenCount { expected, found } => write!(
                f,
                "wrong number of hidden activations: expected {}, found {}",
                expected, found
            ),
            Self::InvalidNoiseCount {
                layer,
                expected,
                found,
            } => write!(
                f,
                "wrong number of {} noise values: expected {}, found {}",
                layer, expected, found
            ),
            Self::InvalidWeightCount { expected, found } => write!(
                f,
                "wrong number of weights: expected {}, found {}",
                expected, found
            ),
            Self::InvalidContextSize {
                index,
                expected,
                found,
            } => write!(
                f,
                "context {} has {} values, expected {}",
                index, found, expected
            ),
            Self::InvalidDropoutRate(rate) => {
                write!(f, "dropout rate {} is not in [0, 1)", rate)
            }
            Self::InvalidNoiseAmplitude(amplitude) => {
                write!(f, "noise amplitude {} is out of range", amplitude)
            }
        }
    }
}

impl error::Error for Error {}
