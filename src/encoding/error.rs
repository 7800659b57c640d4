use std::{error, fmt, io};

use crate::network;

/// The reason saving or loading a weight vector failed.
#[derive(Debug)]
pub enum Error {
    /// The text is not a JSON array of numbers, or the weights could not be written as one.
    Json(serde_json::Error),
    /// The weight file could not be created, opened, read or written.
    Io(io::Error),
    /// The weights were read, but their count does not match the layer sizes of the network they
    /// were loaded into.
    Network(network::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "malformed weight vector: {}", e),
            Self::Io(e) => write!(f, "could not access weight file: {}", e),
            Self::Network(network::Error::InvalidWeightCount { expected, found }) => write!(
                f,
                "saved weights do not fit the network: it has {} weights, the vector has {}",
                expected, found
            ),
            Self::Network(e) => write!(f, "saved weights do not fit the network: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Network(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<network::Error> for Error {
    fn from(e: network::Error) -> Self {
        Self::Network(e)
    }
}
