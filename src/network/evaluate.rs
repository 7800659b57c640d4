//! Forward activation of networks.

use rand::Rng;

use super::{Error, Network, Scalar};
use crate::activation::{normalize, Activation, Activations};
use crate::linalg::dot;

/// Noise added to each layer by [`Network::update_with_noise`].
#[derive(Clone, Debug, PartialEq)]
pub struct Noise<T> {
    /// One value per input, not counting the bias unit.
    pub input: Vec<T>,
    /// One value per hidden unit, not counting the bias unit.
    pub hidden: Vec<T>,
    /// One value per output.
    pub output: Vec<T>,
}

impl<T: Scalar> Noise<T> {
    pub fn new(input: Vec<T>, hidden: Vec<T>, output: Vec<T>) -> Self {
        Self {
            input,
            hidden,
            output,
        }
    }

    /// Returns noise sized for `network`, with every value drawn uniformly from
    /// `[-amplitude, amplitude]`.
    ///
    /// Fails if `amplitude` is NaN, infinite, or so large that the width of the range overflows.
    pub fn uniform<R: Rng + ?Sized>(
        network: &Network<T>,
        amplitude: T,
        rng: &mut R,
    ) -> Result<Self, Error> {
        if !(amplitude.abs() * T::constant(4.0)).is_finite() {
            return Err(Error::InvalidNoiseAmplitude(
                amplitude.to_f64().unwrap_or(f64::NAN),
            ));
        }

        let amplitude = amplitude.abs();
        let mut sample = |n: usize| {
            (0..n)
                .map(|_| rng.gen_range(-amplitude..=amplitude))
                .collect::<Vec<_>>()
        };

        let input = sample(network.num_inputs());
        let hidden = sample(network.num_hiddens());
        let output = sample(network.num_outputs());

        Ok(Self::new(input, hidden, output))
    }

    /// Checks that each noise vector matches the layer sizes of `network`.
    fn check(&self, network: &Network<T>) -> Result<(), Error> {
        let layers = [
            ("input", &self.input, network.num_inputs()),
            ("hidden", &self.hidden, network.num_hiddens()),
            ("output", &self.output, network.num_outputs()),
        ];

        for &(layer, values, expected) in &layers {
            if values.len() != expected {
                return Err(Error::InvalidNoiseCount {
                    layer,
                    expected,
                    found: values.len(),
                });
            }
        }

        Ok(())
    }
}

impl<T: Scalar> Network<T> {
    /// Activates the network with the given inputs, returning its outputs.
    ///
    /// If the network has contexts, the new hidden activations become the most recent context
    /// and the oldest context is discarded. Hidden units are only dropped while a dropout mask
    /// is present, which is only the case during training.
    ///
    /// Fails if the number of inputs does not match the network, leaving it untouched.
    pub fn update(&mut self, inputs: &[T]) -> Result<&[T], Error> {
        let activations = self.activations();
        self.forward(inputs, None, activations)?;
        Ok(&self.output_activations)
    }

    /// Activates the network like [`update`][Self::update], but adds `noise` to the inputs, the
    /// hidden activations and the outputs, clamping each of them into `[0, 1]`. Outputs of a
    /// regression network are not clamped.
    ///
    /// This is meant for testing how robust a trained network is, not for training.
    pub fn update_with_noise(&mut self, inputs: &[T], noise: &Noise<T>) -> Result<&[T], Error> {
        let activations = self.activations();
        self.forward(inputs, Some(noise), activations)?;
        Ok(&self.output_activations)
    }

    /// Computes only the output layer from externally supplied hidden activations (not counting
    /// the bias unit). The inputs and contexts are left untouched.
    pub fn update_hidden(&mut self, hidden: &[T]) -> Result<&[T], Error> {
        if hidden.len() != self.num_hiddens {
            return Err(Error::InvalidHiddenCount {
                expected: self.num_hiddens,
                found: hidden.len(),
            });
        }

        self.hidden_activations[..self.num_hiddens].copy_from_slice(hidden);
        let output = self.activations().output;
        self.activate_outputs(None, output);

        Ok(&self.output_activations)
    }

    /// Runs a full forward pass with the given activation functions.
    pub(crate) fn forward(
        &mut self,
        inputs: &[T],
        noise: Option<&Noise<T>>,
        activations: Activations,
    ) -> Result<(), Error> {
        if inputs.len() != self.num_inputs {
            return Err(Error::InvalidInputCount {
                expected: self.num_inputs,
                found: inputs.len(),
            });
        }
        if let Some(noise) = noise {
            noise.check(self)?;
        }

        // The bias unit stays at 1.0
        for (i, &x) in inputs.iter().enumerate() {
            self.input_activations[i] = match noise {
                Some(noise) => normalize(x + noise.input[i]),
                None => x,
            };
        }

        // Every context contributes the same amount to every hidden unit
        let context_sum = self.contexts.sum_prefix(self.num_hiddens);
        let f = activations.hidden.get_function::<T>();

        for i in 0..self.num_hiddens {
            let sum = dot(&self.input_activations, self.input_weights.row(i)) + context_sum;
            let mut value = f(sum);

            if let Some(noise) = noise {
                value = normalize(value + noise.hidden[i]);
            }

            if self.dropout_mask.is_some() {
                value = if self.is_dropped(i) {
                    T::zero()
                } else {
                    value * self.dropout_scale
                };
            }

            self.hidden_activations[i] = value;
        }

        self.contexts.push(&self.hidden_activations);

        self.activate_outputs(noise.map(|n| n.output.as_slice()), activations.output);

        Ok(())
    }

    /// Computes the output layer from the current hidden activations.
    fn activate_outputs(&mut self, noise: Option<&[T]>, activation: Activation) {
        let f = activation.get_function::<T>();

        for i in 0..self.num_outputs {
            let sum = dot(&self.hidden_activations, self.output_weights.row(i));
            let value = f(sum);

            self.output_activations[i] = match noise {
                Some(noise) if self.regression => value + noise[i],
                Some(noise) => normalize(value + noise[i]),
                None => value,
            };
        }
    }
}
