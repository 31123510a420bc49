//! Word-level Markov chain: training, distributions and generation.
//!
//! - `Corpus`: tokenized training sentences
//! - `TransitionModel`: successor counts per context token
//! - `Distribution`: normalized successor probabilities and sampling
//! - `Generation`: lazy next-token generation from a seed

use rand::Rng;

use crate::error::{ModelError, Result};

/// Training sentences and vocabulary extraction.
pub mod corpus;

/// Normalized probabilities and weighted / uniform sampling.
pub mod distribution;

/// Lazy generation driven by weighted sampling.
pub mod generator;

/// Transition counting and per-context queries.
pub mod transition_model;

/// Internal representation of a single context and its outgoing transitions.
/// This module is not exposed publicly.
mod state;

/// Picks one token uniformly at random.
///
/// # Errors
/// Returns `ModelError::EmptyVocabulary` if `tokens` is empty.
pub fn sample_uniform<'a, R: Rng>(tokens: &'a [String], rng: &mut R) -> Result<&'a str> {
	if tokens.is_empty() {
		return Err(ModelError::EmptyVocabulary);
	}
	Ok(&tokens[rng.random_range(0..tokens.len())])
}
