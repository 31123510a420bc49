use std::iter::FusedIterator;

use log::trace;
use rand::Rng;

use super::transition_model::TransitionModel;
use crate::error::ModelError;

/// Strategy used to select the first token of a generation.
///
/// # Variants
/// - `Custom(String)`: start from the given token.
/// - `Random`: start from a random context learned by the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartSeed {
	Custom(String),
	Random,
}

/// Lifecycle of a `Generation`.
///
/// `Stopped` is terminal: once reached, no further token is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationState {
	Running,
	Stopped,
}

/// A lazy, finite and non-restartable run of next-token prediction.
///
/// Yields the seed first, then one sampled successor per step. The run stops
/// when `max_steps` successors have been produced or when the current token
/// has no learned successor.
///
/// Created by `TransitionModel::generate`.
pub struct Generation<'m, 'r, R: Rng> {
	model: &'m TransitionModel,
	rng: &'r mut R,
	/// Last emitted token (the seed before the first call).
	current: String,
	/// Whether the seed still has to be emitted.
	seed_pending: bool,
	remaining: usize,
	state: GenerationState,
}

impl<'m, 'r, R: Rng> Generation<'m, 'r, R> {
	pub(crate) fn new(model: &'m TransitionModel, seed: &str, max_steps: usize, rng: &'r mut R) -> Self {
		Self {
			model,
			rng,
			current: seed.to_owned(),
			seed_pending: true,
			remaining: max_steps,
			state: GenerationState::Running,
		}
	}

	pub fn state(&self) -> GenerationState {
		self.state
	}

	/// Steps left before the run stops on its budget.
	pub fn remaining(&self) -> usize {
		self.remaining
	}

	fn stop(&mut self) -> Option<String> {
		self.state = GenerationState::Stopped;
		None
	}
}

impl<R: Rng> Iterator for Generation<'_, '_, R> {
	type Item = String;

	fn next(&mut self) -> Option<String> {
		if self.state == GenerationState::Stopped {
			return None;
		}

		if self.seed_pending {
			self.seed_pending = false;
			return Some(self.current.clone());
		}

		if self.remaining == 0 {
			trace!("Generation stopped: no steps left after '{}'", self.current);
			return self.stop();
		}

		match self.model.sample_weighted(&self.current, &mut *self.rng) {
			Ok(next) => {
				trace!("'{}' -> '{}'", self.current, next);
				self.remaining -= 1;
				self.current.clone_from(&next);
				Some(next)
			}
			Err(ModelError::UnknownContext(_)) => {
				trace!("Generation stopped: no successor learned for '{}'", self.current);
				self.stop()
			}
			Err(e) => {
				trace!("Generation stopped: {}", e);
				self.stop()
			}
		}
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		match self.state {
			GenerationState::Stopped => (0, Some(0)),
			GenerationState::Running => {
				let seed = usize::from(self.seed_pending);
				(seed, Some(seed + self.remaining))
			}
		}
	}
}

impl<R: Rng> FusedIterator for Generation<'_, '_, R> {}
