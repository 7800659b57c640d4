//! The neural network structs.

mod backprop;
mod error;
mod evaluate;
mod recurrent;

pub use error::Error;
pub use evaluate::Noise;
pub use recurrent::Recurrent;

use num_traits::Float;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::fmt::Debug;

use crate::activation::{Activation, Activations};
use crate::context::ContextRing;
use crate::linalg::Matrix;

/// A floating point type a [`Network`] can be built on. Implemented for `f32` and `f64`.
pub trait Scalar: Float + SampleUniform + Debug + 'static {
    /// Converts an `f64` constant to this precision.
    fn constant(x: f64) -> Self;
}

impl Scalar for f32 {
    fn constant(x: f64) -> Self {
        x as f32
    }
}

impl Scalar for f64 {
    fn constant(x: f64) -> Self {
        x
    }
}

/// How the initial weights of a [`Network`] are drawn.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WeightInit {
    /// Independent uniform values in `[-1, 1]`.
    Uniform,
    /// Uniform values in `[-1, 1]` divided by the square root of the layer's fan-in (including
    /// the bias unit).
    ScaledByFanIn,
}

impl Default for WeightInit {
    fn default() -> Self {
        WeightInit::Uniform
    }
}

/// A network with one hidden layer, trained by backpropagation with momentum.
///
/// Both the input and hidden layers have an extra bias unit whose activation is always `1.0`.
/// With one or more context buffers configured (see [`set_contexts`][Self::set_contexts]) the
/// network behaves as an Elman simple recurrent network.
#[derive(Clone, Debug, PartialEq)]
pub struct Network<T> {
    // Layer sizes, not counting bias units
    num_inputs: usize,
    num_hiddens: usize,
    num_outputs: usize,
    // Whether the output layer skips the activation function
    regression: bool,
    // The activation function of the hidden layer, and of the output layer unless `regression`
    activation: Activation,
    // Layer activations, bias units last
    input_activations: Vec<T>,
    hidden_activations: Vec<T>,
    output_activations: Vec<T>,
    // Weights, one row per destination unit
    input_weights: Matrix<T>,
    output_weights: Matrix<T>,
    // The previous weight changes, used for momentum
    input_changes: Matrix<T>,
    output_changes: Matrix<T>,
    // Past hidden activations, most recent first
    contexts: ContextRing<T>,
    dropout_rate: f64,
    // `1 / (1 - dropout_rate)`, applied to the hidden units kept by the mask
    dropout_scale: T,
    // Hidden units dropped for the current training pattern, `true` meaning dropped
    dropout_mask: Option<Vec<bool>>,
}

impl<T: Scalar> Network<T> {
    /// Returns a new feed-forward network with the given layer sizes and weights drawn uniformly
    /// from `[-1, 1]`.
    ///
    /// Fails if there are no inputs or no outputs. A network without hidden units is allowed,
    /// in which case the outputs only depend on the hidden bias unit.
    pub fn new<R: Rng + ?Sized>(
        inputs: usize,
        hiddens: usize,
        outputs: usize,
        rng: &mut R,
    ) -> Result<Self, Error> {
        Self::with_init(inputs, hiddens, outputs, WeightInit::Uniform, rng)
    }

    /// Returns a new feed-forward network with the given layer sizes, drawing its weights
    /// according to `init`.
    pub fn with_init<R: Rng + ?Sized>(
        inputs: usize,
        hiddens: usize,
        outputs: usize,
        init: WeightInit,
        rng: &mut R,
    ) -> Result<Self, Error> {
        if inputs == 0 || outputs == 0 {
            return Err(Error::InvalidTopology { inputs, outputs });
        }

        let scale = |fan_in: usize| match init {
            WeightInit::Uniform => T::one(),
            WeightInit::ScaledByFanIn => T::constant(1.0 / (fan_in as f64).sqrt()),
        };
        let input_scale = scale(inputs + 1);
        let output_scale = scale(hiddens + 1);

        let input_weights = Matrix::from_fn(hiddens, inputs + 1, |_, _| {
            rng.gen_range(-T::one()..=T::one()) * input_scale
        });
        let output_weights = Matrix::from_fn(outputs, hiddens + 1, |_, _| {
            rng.gen_range(-T::one()..=T::one()) * output_scale
        });

        tracing::debug!(inputs, hiddens, outputs, ?init, "initialized network");

        Ok(Self {
            num_inputs: inputs,
            num_hiddens: hiddens,
            num_outputs: outputs,
            regression: false,
            activation: Activation::Sigmoid,
            input_activations: vec![T::one(); inputs + 1],
            hidden_activations: vec![T::one(); hiddens + 1],
            output_activations: vec![T::one(); outputs],
            input_changes: Matrix::zeros(hiddens, inputs + 1),
            output_changes: Matrix::zeros(outputs, hiddens + 1),
            input_weights,
            output_weights,
            contexts: ContextRing::empty(hiddens + 1),
            dropout_rate: 0.0,
            dropout_scale: T::one(),
            dropout_mask: None,
        })
    }

    /// Returns the number of inputs, not counting the bias unit.
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Returns the number of hidden units, not counting the bias unit.
    pub fn num_hiddens(&self) -> usize {
        self.num_hiddens
    }

    /// Returns the number of outputs.
    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    /// Returns the input layer activations, including the bias unit at the end.
    pub fn input_activations(&self) -> &[T] {
        &self.input_activations
    }

    /// Returns the hidden layer activations, including the bias unit at the end.
    pub fn hidden_activations(&self) -> &[T] {
        &self.hidden_activations
    }

    /// Returns the outputs of the most recent forward pass.
    pub fn output_activations(&self) -> &[T] {
        &self.output_activations
    }

    /// Returns the weights from the input layer to the hidden layer, one row per hidden unit.
    pub fn input_weights(&self) -> &Matrix<T> {
        &self.input_weights
    }

    /// Returns the weights from the hidden layer to the output layer, one row per output.
    pub fn output_weights(&self) -> &Matrix<T> {
        &self.output_weights
    }

    /// Returns the previous changes to the input weights.
    pub fn input_changes(&self) -> &Matrix<T> {
        &self.input_changes
    }

    /// Returns the previous changes to the output weights.
    pub fn output_changes(&self) -> &Matrix<T> {
        &self.output_changes
    }

    /// Returns the activation function of this `Network`.
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Sets the activation function of this `Network`. Its derivative changes with it, so this
    /// should be done before training.
    pub fn set_activation(&mut self, new: Activation) {
        self.activation = new;
    }

    /// Uses the hyperbolic tangent as the activation function.
    pub fn set_tanh_activation(&mut self) {
        self.set_activation(Activation::Tanh);
    }

    /// Returns whether the output layer is linear.
    pub fn is_regression(&self) -> bool {
        self.regression
    }

    /// Sets whether the output layer is linear. If `false`, the activation function is applied
    /// to the outputs as well.
    pub fn set_regression(&mut self, regression: bool) {
        self.regression = regression;
    }

    /// Returns the activation functions used by the hidden and output layers.
    pub fn activations(&self) -> Activations {
        let output = if self.regression {
            Activation::Linear
        } else {
            self.activation
        };

        Activations::new(self.activation, output)
    }

    /// Returns the dropout rate. Zero means dropout is disabled.
    pub fn dropout_rate(&self) -> f64 {
        self.dropout_rate
    }

    /// Sets the fraction of hidden units dropped for each training pattern. Must be in `[0, 1)`.
    pub fn set_dropout(&mut self, rate: f64) -> Result<(), Error> {
        if !(0.0..1.0).contains(&rate) {
            return Err(Error::InvalidDropoutRate(rate));
        }

        self.dropout_rate = rate;
        self.dropout_scale = T::constant(1.0 / (1.0 - rate));

        Ok(())
    }

    /// Returns the current dropout mask, where `true` marks a dropped hidden unit. There is only
    /// a mask while training.
    pub fn dropout_mask(&self) -> Option<&[bool]> {
        self.dropout_mask.as_deref()
    }

    /// Draws a new dropout mask, dropping each hidden unit with probability equal to the dropout
    /// rate. Forward passes use the mask until it is cleared.
    pub fn draw_dropout_mask<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let rate = self.dropout_rate;
        let mask = (0..self.num_hiddens).map(|_| rng.gen_bool(rate)).collect();
        self.dropout_mask = Some(mask);
    }

    /// Removes the dropout mask so that forward passes no longer drop hidden units.
    pub fn clear_dropout_mask(&mut self) {
        self.dropout_mask = None;
    }

    /// Returns whether hidden unit `i` is dropped by the current mask.
    fn is_dropped(&self, i: usize) -> bool {
        self.dropout_mask.as_ref().map_or(false, |mask| mask[i])
    }

    /// Returns the number of context buffers.
    pub fn num_contexts(&self) -> usize {
        self.contexts.len()
    }

    /// Iterates over the context buffers from the most recent to the oldest.
    pub fn contexts(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.contexts.iter()
    }

    /// Replaces the recurrent memory of the network.
    ///
    /// If `values` is `None`, `count` buffers filled with `0.5` are used. Otherwise `count` is
    /// ignored and `values` become the contexts, most recent first. Each buffer must have one
    /// value per hidden unit plus one for the bias unit.
    ///
    /// With no contexts the network is a plain feed-forward network. Calling this again resets
    /// the memory, for example between independent sequences.
    pub fn set_contexts(&mut self, count: usize, values: Option<Vec<Vec<T>>>) -> Result<(), Error> {
        let width = self.num_hiddens + 1;
        self.contexts = match values {
            None => ContextRing::filled(count, width, T::constant(0.5)),
            Some(buffers) => ContextRing::from_buffers(width, &buffers).map_err(|index| {
                Error::InvalidContextSize {
                    index,
                    expected: width,
                    found: buffers[index].len(),
                }
            })?,
        };

        tracing::trace!(contexts = self.contexts.len(), "reset contexts");

        Ok(())
    }

    /// Removes all context buffers, making the network purely feed-forward.
    pub fn clear_contexts(&mut self) {
        self.contexts = ContextRing::empty(self.num_hiddens + 1);
    }

    /// Returns the length of the flat weight vector used by [`weights`][Self::weights] and
    /// [`set_weights`][Self::set_weights].
    pub fn num_weights(&self) -> usize {
        self.input_weights.as_slice().len() + self.output_weights.as_slice().len()
    }

    /// Returns all weights as one vector: the input weights followed by the output weights, each
    /// ordered by destination unit and then by source unit (bias last).
    pub fn weights(&self) -> Vec<T> {
        self.input_weights
            .as_slice()
            .iter()
            .chain(self.output_weights.as_slice())
            .cloned()
            .collect()
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

        let (input, output) = weights.split_at(self.input_weights.as_slice().len());
        self.input_weights.as_mut_slice().copy_from_slice(input);
        self.output_weights.as_mut_slice().copy_from_slice(output);

        Ok(())
    }
}

#[cfg(feature = "json")]
impl<T> Network<T>
where
    T: Scalar + Serialize + serde::de::DeserializeOwned,
{
    /// Encodes the flat weight vector as a JSON array.
    pub fn weights_to_string(&self) -> Result<String, crate::encoding::Error> {
        crate::encoding::to_string(&self.weights())
    }

    /// Writes the flat weight vector to a file as a JSON array.
    ///
    /// Recursively creates missing directories if `create_dirs` is `true`.
    pub fn weights_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
        create_dirs: bool,
    ) -> Result<(), crate::encoding::Error> {
        crate::encoding::to_file(&self.weights(), path, create_dirs)
    }

    /// Loads weights previously saved with [`weights_to_string`][Self::weights_to_string]. The
    /// network must have the same layer sizes as the saved one.
    pub fn load_weights_str(&mut self, s: &str) -> Result<(), crate::encoding::Error> {
        let weights = crate::encoding::load_str::<T>(s)?;
        self.set_weights(&weights)?;
        Ok(())
    }

    /// Loads weights previously saved with [`weights_to_file`][Self::weights_to_file].
    pub fn load_weights_file<P: AsRef<std::path::Path>>(
        &mut self,
        path: P,
    ) -> Result<(), crate::encoding::Error> {
        let weights = crate::encoding::load_file::<T, _>(path)?;
        self.set_weights(&weights)?;
        Ok(())
    }
}
