use std::collections::HashMap;

use super::distribution::Distribution;

/// Represents a context token in the transition model.
///
/// A `State` stores all observed transitions from one token (the key it is
/// stored under in `TransitionModel`) to the next one.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during learning
/// - Expose the normalized distribution of successors
///
/// ## Invariants
/// - All transitions leave the same context token
/// - Each transition occurrence count is strictly positive
/// - Successors are kept in the order they were first observed
#[derive(Clone, Debug, Default)]
pub(crate) struct State {
	/// Outgoing transitions in first-observed order.
	/// Example: [("coffee", 2), ("tea", 1)]
	transitions: Vec<(String, usize)>,
	/// Position of each successor inside `transitions`.
	index: HashMap<String, usize>,
}

impl State {
	/// Records an occurrence of a transition toward `next`.
	///
	/// - If the transition already exists, its occurrence count is increased.
	/// - Otherwise, a new transition is appended with an initial count of 1.
	pub fn add_transition(&mut self, next: &str) {
		match self.index.get(next) {
			Some(&position) => self.transitions[position].1 += 1,
			None => {
				self.index.insert(next.to_owned(), self.transitions.len());
				self.transitions.push((next.to_owned(), 1));
			}
		}
	}

	/// How many times `next` followed this context.
	pub fn count(&self, next: &str) -> usize {
		self.index
			.get(next)
			.map_or(0, |&position| self.transitions[position].1)
	}

	/// Total number of observed transitions leaving this context.
	pub fn total(&self) -> usize {
		self.transitions.iter().map(|(_, occurrence)| occurrence).sum()
	}

	/// Converts occurrence counts to probabilities.
	pub fn distribution(&self) -> Distribution {
		Distribution::from_counts(
			self.transitions
				.iter()
				.map(|(next, occurrence)| (next.as_str(), *occurrence)),
		)
	}
}
