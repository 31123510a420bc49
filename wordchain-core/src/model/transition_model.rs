use std::collections::HashMap;

use log::debug;
use rand::Rng;

use super::corpus::Corpus;
use super::distribution::Distribution;
use super::generator::{Generation, StartSeed};
use super::sample_uniform;
use super::state::State;
use crate::error::{ModelError, Result};

/// Word-level transition model (a first-order Markov chain over tokens).
///
/// The `TransitionModel` stores, for every token followed by at least one
/// other token in the training corpus, how many times each successor was
/// observed. It is built once and never mutated afterward, so a shared
/// reference can be read from any number of threads.
///
/// # Responsibilities
/// - Count adjacent token pairs of every sentence
/// - Turn the counts of a context into a probability distribution
/// - Sample successors, either weighted by the counts or uniformly
/// - Drive a bounded generation from a seed token
///
/// # Invariants
/// - Every stored context has at least one successor with a count >= 1
/// - `contexts` and `vocabulary` hold each token once, in first-seen order
#[derive(Clone, Debug, Default)]
pub struct TransitionModel {
	/// Mapping from a context token to its outgoing transitions
	states: HashMap<String, State>,

	/// Context tokens in the order they were first observed
	contexts: Vec<String>,

	/// All distinct tokens of the corpus
	vocabulary: Vec<String>,
}

impl TransitionModel {
	/// Builds the transition table from a corpus.
	///
	/// For every sentence and every adjacent pair `(current, next)`, the count
	/// of `current -> next` is incremented. Sentences with fewer than two
	/// tokens add no transition but their tokens still join the vocabulary.
	/// An empty corpus yields an empty model.
	pub fn build(corpus: &Corpus) -> Self {
		let mut model = Self {
			states: HashMap::new(),
			contexts: Vec::new(),
			vocabulary: corpus.vocabulary(),
		};

		for sentence in corpus.sentences() {
			for pair in sentence.windows(2) {
				model.record(&pair[0], &pair[1]);
			}
		}

		debug!(
			"Built transition model: {} sentences, {} tokens, {} contexts, {} transitions",
			corpus.len(),
			model.vocabulary.len(),
			model.contexts.len(),
			model.transition_count()
		);
		model
	}

	/// Inserts the transition `current -> next`, or increments its count.
	fn record(&mut self, current: &str, next: &str) {
		if !self.states.contains_key(current) {
			self.contexts.push(current.to_owned());
		}
		self.states
			.entry(current.to_owned())
			.or_default()
			.add_transition(next);
	}

	/// All distinct tokens of the training corpus, in first-seen order.
	pub fn vocabulary(&self) -> &[String] {
		&self.vocabulary
	}

	/// Context tokens (tokens with at least one successor), in first-seen order.
	pub fn contexts(&self) -> impl Iterator<Item = &str> {
		self.contexts.iter().map(String::as_str)
	}

	/// Number of contexts.
	pub fn len(&self) -> usize {
		self.contexts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.contexts.is_empty()
	}

	/// Total number of observed transitions (sum of all counts).
	pub fn transition_count(&self) -> usize {
		self.states.values().map(State::total).sum()
	}

	/// How many times `successor` followed `context` in training.
	pub fn count(&self, context: &str, successor: &str) -> usize {
		self.states.get(context).map_or(0, |state| state.count(successor))
	}

	/// Whether `context` has any learned successor.
	pub fn has_successors(&self, context: &str) -> bool {
		self.states.contains_key(context)
	}

	/// Returns the successors of `context` with their probabilities.
	///
	/// Successors are listed in the order they were first observed. An unknown
	/// context yields an empty `Distribution`: this means "no learned
	/// transitions" and is not an error.
	pub fn get_distribution(&self, context: &str) -> Distribution {
		self.states
			.get(context)
			.map(State::distribution)
			.unwrap_or_default()
	}

	/// Picks one token of `vocabulary` uniformly, ignoring any context.
	///
	/// # Errors
	/// Returns `ModelError::EmptyVocabulary` if `vocabulary` is empty.
	pub fn sample_naive<'a, R: Rng>(vocabulary: &'a [String], rng: &mut R) -> Result<&'a str> {
		sample_uniform(vocabulary, rng)
	}

	/// Picks one token of the model's own vocabulary uniformly.
	///
	/// # Errors
	/// Returns `ModelError::EmptyVocabulary` if the model was built from an
	/// empty corpus.
	pub fn sample_vocabulary<R: Rng>(&self, rng: &mut R) -> Result<&str> {
		Self::sample_naive(&self.vocabulary, rng)
	}

	/// Draws a successor of `context` weighted by its learned probability.
	///
	/// # Errors
	/// Returns `ModelError::UnknownContext` if `context` has no successors.
	pub fn sample_weighted<R: Rng>(&self, context: &str, rng: &mut R) -> Result<String> {
		let distribution = self.get_distribution(context);
		if distribution.is_empty() {
			return Err(ModelError::UnknownContext(context.to_owned()));
		}
		distribution.sample(rng).map(str::to_owned)
	}

	/// Returns a random context token, useful for starting a generation.
	///
	/// Returns `None` if the model has no contexts.
	pub fn random_context<R: Rng>(&self, rng: &mut R) -> Option<&str> {
		sample_uniform(&self.contexts, rng).ok()
	}

	/// Resolves a `StartSeed` into the first token of a generation.
	///
	/// Returns `None` for `StartSeed::Random` on a model without contexts.
	pub fn resolve_seed<R: Rng>(&self, start_seed: &StartSeed, rng: &mut R) -> Option<String> {
		match start_seed {
			StartSeed::Custom(token) => Some(token.clone()),
			StartSeed::Random => self.random_context(rng).map(str::to_owned),
		}
	}

	/// Starts a lazy generation from `seed`.
	///
	/// The returned iterator yields `seed`, then up to `max_steps` sampled
	/// successors. It stops early as soon as the current token has no learned
	/// successor.
	pub fn generate<'m, 'r, R: Rng>(&'m self, seed: &str, max_steps: usize, rng: &'r mut R) -> Generation<'m, 'r, R> {
		Generation::new(self, seed, max_steps, rng)
	}

	/// Runs a full generation and collects its tokens.
	pub fn generate_tokens<R: Rng>(&self, seed: &str, max_steps: usize, rng: &mut R) -> Vec<String> {
		self.generate(seed, max_steps, rng).collect()
	}

	/// Runs a full generation and joins its tokens with single spaces.
	pub fn generate_sentence<R: Rng>(&self, seed: &str, max_steps: usize, rng: &mut R) -> String {
		self.generate_tokens(seed, max_steps, rng).join(" ")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn coffee_model() -> TransitionModel {
		TransitionModel::build(&Corpus::from_sentences(["i want coffee", "i want coffee", "i want tea"]))
	}

	#[test]
	fn build_counts_adjacent_pairs() {
		let model = coffee_model();
		assert_eq!(model.count("i", "want"), 3);
		assert_eq!(model.count("want", "coffee"), 2);
		assert_eq!(model.count("want", "tea"), 1);
		assert_eq!(model.count("coffee", "i"), 0);
		assert_eq!(model.transition_count(), 6);
		assert_eq!(model.contexts().collect::<Vec<_>>(), vec!["i", "want"]);
		assert_eq!(model.vocabulary(), ["i", "want", "coffee", "tea"]);
	}

	#[test]
	fn single_token_sentences_only_feed_vocabulary() {
		let model = TransitionModel::build(&Corpus::from_sentences(["hello", "world"]));
		assert!(model.is_empty());
		assert_eq!(model.vocabulary(), ["hello", "world"]);
	}

	#[test]
	fn empty_corpus_gives_empty_model() {
		let mut rng = StdRng::seed_from_u64(0);
		let model = TransitionModel::build(&Corpus::default());
		assert!(model.is_empty());
		assert_eq!(model.transition_count(), 0);
		assert!(matches!(model.sample_vocabulary(&mut rng), Err(ModelError::EmptyVocabulary)));
		assert_eq!(model.random_context(&mut rng), None);
	}

	#[test]
	fn reads_do_not_create_contexts() {
		let model = coffee_model();
		assert!(model.get_distribution("tea").is_empty());
		assert!(!model.has_successors("tea"));
		assert_eq!(model.len(), 2);
	}

	#[test]
	fn sample_weighted_unknown_context() {
		let mut rng = StdRng::seed_from_u64(3);
		let model = coffee_model();
		match model.sample_weighted("tea", &mut rng) {
			Err(ModelError::UnknownContext(context)) => assert_eq!(context, "tea"),
			other => panic!("unexpected result: {:?}", other),
		}
	}

	#[test]
	fn sample_weighted_only_returns_observed_successors() {
		let mut rng = StdRng::seed_from_u64(99);
		let model = coffee_model();
		for _ in 0..200 {
			let next = model.sample_weighted("want", &mut rng).unwrap();
			assert!(next == "coffee" || next == "tea");
			assert_eq!(model.sample_weighted("i", &mut rng).unwrap(), "want");
		}
	}

	#[test]
	fn resolve_seed() {
		let mut rng = StdRng::seed_from_u64(5);
		let model = coffee_model();
		assert_eq!(model.resolve_seed(&StartSeed::Custom("tea".to_owned()), &mut rng), Some("tea".to_owned()));

		let seed = model.resolve_seed(&StartSeed::Random, &mut rng).unwrap();
		assert!(model.has_successors(&seed));

		let empty = TransitionModel::default();
		assert_eq!(empty.resolve_seed(&StartSeed::Random, &mut rng), None);
	}

	#[test]
	fn model_is_shareable_across_threads() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<TransitionModel>();
	}
}
