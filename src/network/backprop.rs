//! Backpropagation of errors and momentum weight updates.

use num_traits::Float;

use super::{Error, Network, Scalar};
use crate::activation::Activations;
use crate::linalg::{axpy, scal};

impl<T: Scalar> Network<T> {
    /// Propagates the error between `targets` and the outputs of the most recent forward pass
    /// back through the network, updating every weight.
    ///
    /// Each weight moves by `learning_rate * delta * source + momentum * previous_change`, where
    /// `previous_change` is the change applied to it by the previous call. Returns the total
    /// squared error `sum((target - output)^2)` of the outputs before the update.
    ///
    /// Fails if the number of targets does not match the network, leaving it untouched.
    pub fn back_propagate(
        &mut self,
        targets: &[T],
        learning_rate: T,
        momentum: T,
    ) -> Result<T, Error> {
        let activations = self.activations();
        self.backward(targets, learning_rate, momentum, activations)
    }

    /// Backpropagates with the given activation functions, which must be the ones used by the
    /// preceding forward pass.
    pub(crate) fn backward(
        &mut self,
        targets: &[T],
        learning_rate: T,
        momentum: T,
        activations: Activations,
    ) -> Result<T, Error> {
        if targets.len() != self.num_outputs {
            return Err(Error::InvalidTargetCount {
                expected: self.num_outputs,
                found: targets.len(),
            });
        }

        // A linear output layer has a derivative of one, which makes these plain differences
        let output_deltas = targets
            .iter()
            .zip(&self.output_activations)
            .map(|(&target, &output)| activations.output.derivative(output) * (target - output))
            .collect::<Vec<_>>();

        let hidden = activations.hidden;
        let hidden_deltas = (0..self.num_hiddens)
            .map(|i| {
                let error = output_deltas
                    .iter()
                    .enumerate()
                    .fold(T::zero(), |e, (j, &delta)| {
                        e + delta * self.output_weights.row(j)[i]
                    });
                let y = self.hidden_activations[i];

                // Kept units were scaled up by the dropout mask, so the derivative is taken at
                // their unscaled value
                if self.dropout_mask.is_some() && !self.is_dropped(i) {
                    hidden.derivative(y / self.dropout_scale) * self.dropout_scale * error
                } else {
                    hidden.derivative(y) * error
                }
            })
            .collect::<Vec<_>>();

        let error = targets
            .iter()
            .zip(&self.output_activations)
            .fold(T::zero(), |e, (&target, &output)| {
                e + (target - output).powi(2)
            });

        for (j, &delta) in output_deltas.iter().enumerate() {
            update_row(
                self.output_weights.row_mut(j),
                self.output_changes.row_mut(j),
                &self.hidden_activations,
                learning_rate * delta,
                momentum,
            );
        }

        for (i, &delta) in hidden_deltas.iter().enumerate() {
            // Dropped units keep both their weights and their previous changes
            if self.is_dropped(i) {
                continue;
            }

            update_row(
                self.input_weights.row_mut(i),
                self.input_changes.row_mut(i),
                &self.input_activations,
                learning_rate * delta,
                momentum,
            );
        }

        Ok(error)
    }
}

/// Applies `change = rate * source + momentum * change` and `weight += change` to one row of
/// weights.
fn update_row<T: Float>(weights: &mut [T], changes: &mut [T], sources: &[T], rate: T, momentum: T) {
    scal(momentum, changes);
    axpy(rate, sources, changes);
    axpy(T::one(), changes, weights);
}
