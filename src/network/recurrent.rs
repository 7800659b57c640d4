//! Fully recurrent networks whose hidden state is fed back as extra inputs.

use super::{Error, Scalar};
use crate::activation::Activation;
use crate::linalg::{dot, Matrix};

/// A single layer of tanh units, some of them outputs and the rest a hidden state that is fed
/// back into the layer on the next [`update`][Self::update].
///
/// There is no training for this network. Its weights are set from outside with
/// [`set_weights`][Self::set_weights], for example by an evolutionary search.
#[derive(Clone, Debug, PartialEq)]
pub struct Recurrent<T> {
    num_inputs: usize,
    num_hiddens: usize,
    num_outputs: usize,
    regression: bool,
    // External inputs, then the previous hidden state, then the bias unit
    input_activations: Vec<T>,
    // Outputs, then the hidden state
    unit_activations: Vec<T>,
    // One row per unit, outputs first
    weights: Matrix<T>,
}

impl<T: Scalar> Recurrent<T> {
    /// Returns a new network with all weights set to zero and the hidden state set to one.
    ///
    /// Fails if there are no inputs or no outputs.
    pub fn new(inputs: usize, hiddens: usize, outputs: usize) -> Result<Self, Error> {
        if inputs == 0 || outputs == 0 {
            return Err(Error::InvalidTopology { inputs, outputs });
        }

        let units = outputs + hiddens;
        let sources = inputs + hiddens + 1;

        tracing::debug!(inputs, hiddens, outputs, "initialized recurrent network");

        Ok(Self {
            num_inputs: inputs,
            num_hiddens: hiddens,
            num_outputs: outputs,
            regression: false,
            input_activations: vec![T::one(); sources],
            unit_activations: vec![T::one(); units],
            weights: Matrix::zeros(units, sources),
        })
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn num_hiddens(&self) -> usize {
        self.num_hiddens
    }

    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    pub fn is_regression(&self) -> bool {
        self.regression
    }

    /// Sets whether the outputs are linear instead of passing through tanh. Hidden units always
    /// use tanh.
    pub fn set_regression(&mut self, regression: bool) {
        self.regression = regression;
    }

    /// Returns the input layer of the most recent update: the inputs, the hidden state they were
    /// combined with and the bias unit.
    pub fn input_activations(&self) -> &[T] {
        &self.input_activations
    }

    /// Returns the current hidden state, which the next update receives as extra inputs.
    pub fn state(&self) -> &[T] {
        &self.unit_activations[self.num_outputs..]
    }

    /// Returns the number of weights, `(outputs + hiddens) * (inputs + hiddens + 1)`.
    pub fn num_weights(&self) -> usize {
        self.weights.as_slice().len()
    }

    /// Returns the weights, one row per unit with the outputs first. Each row holds the weights
    /// of the inputs, then of the hidden state, then of the bias unit.
    pub fn weights(&self) -> &[T] {
        self.weights.as_slice()
    }

    /// Overwrites all weights from a vector in the layout returned by
    /// [`weights`][Self::weights].
    pub fn set_weights(&mut self, weights: &[T]) -> Result<(), Error> {
        let expected = self.num_weights();
        if weights.len() != expected {
            return Err(Error::InvalidWeightCount {
                expected,
                found: weights.len(),
            });
        }

        self.weights.as_mut_slice().copy_from_slice(weights);
        Ok(())
    }

    /// Sets the hidden state to zero, for example between independent sequences.
    pub fn reset(&mut self) {
        for h in &mut self.unit_activations[self.num_outputs..] {
            *h = T::zero();
        }
    }

    /// Activates the network with the given inputs and the hidden state left by the previous
    /// update, returning the outputs.
    ///
    /// Fails if the number of inputs does not match the network, leaving it untouched.
    pub fn update(&mut self, inputs: &[T]) -> Result<&[T], Error> {
        if inputs.len() != self.num_inputs {
            return Err(Error::InvalidInputCount {
                expected: self.num_inputs,
                found: inputs.len(),
            });
        }

        let n = self.num_inputs;
        self.input_activations[..n].copy_from_slice(inputs);
        self.input_activations[n..n + self.num_hiddens]
            .copy_from_slice(&self.unit_activations[self.num_outputs..]);

        let output = if self.regression {
            Activation::Linear
        } else {
            Activation::Tanh
        };

        for i in 0..self.weights.rows() {
            let sum = dot(&self.input_activations, self.weights.row(i));
            let activation = if i < self.num_outputs {
                output
            } else {
                Activation::Tanh
            };

            self.unit_activations[i] = activation.apply(sum);
        }

        Ok(&self.unit_activations[..self.num_outputs])
    }
}
