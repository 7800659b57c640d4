//! Feed-forward and Elman simple recurrent neural networks with one hidden layer, trained by
//! backpropagation with momentum.
//!
//! A [`Network`] owns all of its state: layer activations, weights, the previous weight changes
//! used for momentum, the context buffers that give it a memory of past hidden activations, and
//! the dropout mask used while training. Randomness is never global; weight initialization and
//! dropout draw from a generator passed in by the caller.
//!
//! A [`Recurrent`] network is a simpler fully recurrent model without training of its own, whose
//! weights are set from outside.
//!
//! # Examples
//!
//! ```
//! use elman::{Network, Pattern, TrainConfig};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let mut network = Network::<f64>::new(2, 2, 1, &mut rng).unwrap();
//!
//! let patterns: Vec<Pattern<f64>> = vec![
//!     (vec![0.0, 0.0], vec![0.0]).into(),
//!     (vec![0.0, 1.0], vec![1.0]).into(),
//!     (vec![1.0, 0.0], vec![1.0]).into(),
//!     (vec![1.0, 1.0], vec![0.0]).into(),
//! ];
//!
//! // 1000 passes with a learning rate of 0.6 and a momentum of 0.4
//! let errors = network
//!     .train(&patterns, &TrainConfig::new(1000, 0.6, 0.4), &mut rng)
//!     .unwrap();
//! assert_eq!(1000, errors.len());
//!
//! // Get the output of the network for new inputs
//! let output = network.update(&[1.0, 1.0]).unwrap();
//! assert_eq!(1, output.len());
//! ```

// Values that are too small/large are not checked for. Operations on non-normal numbers result in
// non-normal numbers, never panicking.

pub mod activation;
pub mod context;
#[cfg(feature = "json")]
pub mod encoding;
pub mod linalg;
pub mod network;
pub mod train;

pub use activation::{Activation, Activations};
pub use network::{Error, Network, Noise, Recurrent, Scalar, WeightInit};
pub use train::{Evaluation, Pattern, TrainConfig};
