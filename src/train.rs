//! Training a [`Network`] on a set of patterns.

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::ops::ControlFlow;

use crate::activation::{Activation, Activations};
use crate::network::{Error, Network, Scalar};

/// An input vector and the outputs the network should produce for it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pattern<T> {
    pub input: Vec<T>,
    pub target: Vec<T>,
}

impl<T> Pattern<T> {
    pub fn new(input: Vec<T>, target: Vec<T>) -> Self {
        Self { input, target }
    }
}

impl<T> From<(Vec<T>, Vec<T>)> for Pattern<T> {
    fn from((input, target): (Vec<T>, Vec<T>)) -> Self {
        Self::new(input, target)
    }
}

/// The result of activating a network with the input of a [`Pattern`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Evaluation<T> {
    pub input: Vec<T>,
    pub output: Vec<T>,
    pub target: Vec<T>,
}

/// Parameters of a training run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrainConfig<T> {
    /// The number of passes over the pattern set.
    pub iterations: usize,
    pub learning_rate: T,
    /// The fraction of the previous weight change carried into the next one.
    pub momentum: T,
    /// Whether to emit a `debug` event with the current error every `report_interval`
    /// iterations.
    #[cfg_attr(feature = "serde", serde(default))]
    pub debug: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_report_interval"))]
    pub report_interval: usize,
    /// Replaces the hidden layer's activation function for this run only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hidden_activation: Option<Activation>,
    /// Replaces the output layer's activation function for this run only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub output_activation: Option<Activation>,
}

#[cfg(feature = "serde")]
fn default_report_interval() -> usize {
    1000
}

impl<T: Scalar> Default for TrainConfig<T> {
    fn default() -> Self {
        Self {
            iterations: 1000,
            learning_rate: T::constant(0.6),
            momentum: T::constant(0.4),
            debug: false,
            report_interval: 1000,
            hidden_activation: None,
            output_activation: None,
        }
    }
}

impl<T: Scalar> TrainConfig<T> {
    /// Returns a config with the given number of iterations, learning rate and momentum.
    pub fn new(iterations: usize, learning_rate: T, momentum: T) -> Self {
        Self {
            iterations,
            learning_rate,
            momentum,
            ..Self::default()
        }
    }

    /// Enables or disables progress events.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl<T: Scalar> Network<T> {
    /// Trains the network on `patterns` for `config.iterations` passes, returning the error of
    /// each pass.
    ///
    /// Each pass activates the network and backpropagates for every pattern in order. If a
    /// dropout rate is set, a new dropout mask is drawn from `rng` before each pattern, and the
    /// mask is removed once training ends. The error of a pass is the sum of the squared errors
    /// over every output of every pattern, without normalization.
    ///
    /// All patterns are checked against the network before training starts.
    pub fn train<R: Rng + ?Sized>(
        &mut self,
        patterns: &[Pattern<T>],
        config: &TrainConfig<T>,
        rng: &mut R,
    ) -> Result<Vec<T>, Error> {
        self.train_until(patterns, config, rng, |_, _| ControlFlow::Continue(()))
    }

    /// Trains like [`train`][Self::train], calling `on_iteration` with the index and error of
    /// each pass. Training stops early if it returns [`ControlFlow::Break`], and the errors of
    /// the completed passes are returned.
    pub fn train_until<R, F>(
        &mut self,
        patterns: &[Pattern<T>],
        config: &TrainConfig<T>,
        rng: &mut R,
        mut on_iteration: F,
    ) -> Result<Vec<T>, Error>
    where
        R: Rng + ?Sized,
        F: FnMut(usize, T) -> ControlFlow<()>,
    {
        self.check_patterns(patterns)?;

        let stored = self.activations();
        let activations = Activations::new(
            config.hidden_activation.unwrap_or(stored.hidden),
            config.output_activation.unwrap_or(stored.output),
        );

        tracing::debug!(
            patterns = patterns.len(),
            iterations = config.iterations,
            ?activations,
            "training started"
        );

        let mut errors = Vec::with_capacity(config.iterations);
        let result = self.run_passes(
            patterns,
            config,
            activations,
            rng,
            &mut on_iteration,
            &mut errors,
        );

        self.clear_dropout_mask();
        result?;

        tracing::debug!(
            iterations = errors.len(),
            final_error = ?errors.last(),
            "training finished"
        );

        Ok(errors)
    }

    /// Runs the training passes, appending the error of each pass to `errors`.
    fn run_passes<R, F>(
        &mut self,
        patterns: &[Pattern<T>],
        config: &TrainConfig<T>,
        activations: Activations,
        rng: &mut R,
        on_iteration: &mut F,
        errors: &mut Vec<T>,
    ) -> Result<(), Error>
    where
        R: Rng + ?Sized,
        F: FnMut(usize, T) -> ControlFlow<()>,
    {
        let report_interval = config.report_interval.max(1);

        for iteration in 0..config.iterations {
            let mut error = T::zero();

            for pattern in patterns {
                if self.dropout_rate() > 0.0 {
                    self.draw_dropout_mask(rng);
                }

                self.forward(&pattern.input, None, activations)?;
                error = error
                    + self.backward(
                        &pattern.target,
                        config.learning_rate,
                        config.momentum,
                        activations,
                    )?;
            }

            errors.push(error);

            if config.debug && iteration % report_interval == 0 {
                tracing::debug!(iteration, ?error, "training progress");
            }

            if on_iteration(iteration, error).is_break() {
                tracing::debug!(iteration, "training stopped early");
                break;
            }
        }

        Ok(())
    }

    /// Activates the network with the input of each pattern, returning the inputs, outputs and
    /// targets.
    pub fn test(&mut self, patterns: &[Pattern<T>]) -> Result<Vec<Evaluation<T>>, Error> {
        self.check_patterns(patterns)?;

        patterns
            .iter()
            .map(|pattern| {
                let output = self.update(&pattern.input)?.to_vec();
                tracing::debug!(
                    input = ?pattern.input,
                    output = ?output,
                    target = ?pattern.target,
                    "evaluated pattern"
                );

                Ok(Evaluation {
                    input: pattern.input.clone(),
                    output,
                    target: pattern.target.clone(),
                })
            })
            .collect()
    }

    /// Checks that every pattern matches the input and output counts of the network.
    fn check_patterns(&self, patterns: &[Pattern<T>]) -> Result<(), Error> {
        for pattern in patterns {
            if pattern.input.len() != self.num_inputs() {
                return Err(Error::InvalidInputCount {
                    expected: self.num_inputs(),
                    found: pattern.input.len(),
                });
            }
            if pattern.target.len() != self.num_outputs() {
                return Err(Error::InvalidTargetCount {
                    expected: self.num_outputs(),
                    found: pattern.target.len(),
                });
            }
        }

        Ok(())
    }
}
