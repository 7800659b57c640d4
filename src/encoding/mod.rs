//! Saving and loading the weights of a [`Network`][crate::Network].
//!
//! The flat weight vector returned by [`Network::weights`][crate::Network::weights] is the only
//! persisted state. It is stored as a JSON array, and loading it requires a network with the
//! same layer sizes.
//!
//! # Examples
//!
//! ```
//! use elman::Network;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let trained = Network::<f64>::new(2, 3, 1, &mut rng).unwrap();
//! let saved = trained.weights_to_string().unwrap();
//!
//! let mut restored = Network::<f64>::new(2, 3, 1, &mut rng).unwrap();
//! restored.load_weights_str(&saved).unwrap();
//! assert_eq!(trained.weights(), restored.weights());
//! ```

mod error;
mod functions;

pub use error::Error;
pub(crate) use functions::*;
