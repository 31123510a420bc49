use rand::Rng;
use serde::Serialize;

use crate::error::{ModelError, Result};

/// Normalized probabilities over the successors of a context.
///
/// `successors[i]` is drawn with probability `probabilities[i]`. The two lists
/// always have the same length, and a non-empty distribution sums to 1.0
/// (within floating-point tolerance).
///
/// An empty distribution means "no learned transitions": it is what
/// `TransitionModel::get_distribution` returns for an unknown context.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Distribution {
	successors: Vec<String>,
	probabilities: Vec<f64>,
}

impl Distribution {
	/// Builds a distribution from raw occurrence counts.
	///
	/// Entries with a zero count are skipped. The order of `counts` is kept.
	pub fn from_counts<'a, I>(counts: I) -> Self
	where
		I: IntoIterator<Item = (&'a str, usize)>,
	{
		let counts: Vec<(&str, usize)> = counts.into_iter().filter(|(_, count)| *count > 0).collect();
		let total: usize = counts.iter().map(|(_, count)| count).sum();
		if total == 0 {
			return Self::default();
		}

		let (successors, probabilities) = counts
			.into_iter()
			.map(|(token, count)| (token.to_owned(), count as f64 / total as f64))
			.unzip();
		Self { successors, probabilities }
	}

	/// Builds a distribution from hand-picked weights, normalizing them.
	///
	/// # Errors
	/// Returns `ModelError::InvalidWeights` if a weight is negative or not
	/// finite, or if the weights do not sum to a positive value.
	pub fn from_weights<I, S>(weights: I) -> Result<Self>
	where
		I: IntoIterator<Item = (S, f64)>,
		S: Into<String>,
	{
		let mut successors = Vec::new();
		let mut probabilities = Vec::new();
		for (token, weight) in weights {
			let token = token.into();
			if !weight.is_finite() || weight < 0.0 {
				return Err(ModelError::InvalidWeights(format!("weight of '{}' is {}", token, weight)));
			}
			successors.push(token);
			probabilities.push(weight);
		}

		// Scale by the largest weight first so the sum cannot overflow
		let largest = probabilities.iter().copied().fold(0.0, f64::max);
		if largest <= 0.0 {
			return Err(ModelError::InvalidWeights("weights must sum to a positive value".to_owned()));
		}
		probabilities.iter_mut().for_each(|p| *p /= largest);
		let total: f64 = probabilities.iter().sum();
		probabilities.iter_mut().for_each(|p| *p /= total);

		Ok(Self { successors, probabilities })
	}

	pub fn successors(&self) -> &[String] {
		&self.successors
	}

	pub fn probabilities(&self) -> &[f64] {
		&self.probabilities
	}

	pub fn len(&self) -> usize {
		self.successors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.successors.is_empty()
	}

	/// Probability of a single successor, `0.0` when it was never observed.
	pub fn probability(&self, token: &str) -> f64 {
		self.iter()
			.find(|(successor, _)| *successor == token)
			.map_or(0.0, |(_, p)| p)
	}

	/// Iterates over `(successor, probability)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
		self.successors
			.iter()
			.map(String::as_str)
			.zip(self.probabilities.iter().copied())
	}

	/// Draws one successor by inverse-CDF sampling.
	///
	/// `[0, 1)` is split into consecutive intervals, one per successor and as
	/// wide as its probability. A uniform draw picks the interval containing it.
	///
	/// # Errors
	/// Returns `ModelError::EmptyDistribution` if there is nothing to draw.
	pub fn sample<R: Rng>(&self, rng: &mut R) -> Result<&str> {
		let last = self.successors.last().ok_or(ModelError::EmptyDistribution)?;

		let u: f64 = rng.random();
		let mut cumulative = 0.0;
		for (successor, p) in self.iter() {
			cumulative += p;
			if u < cumulative {
				return Ok(successor);
			}
		}

		// Rounding can leave the cumulative sum just below 1.0
		Ok(last.as_str())
	}

	/// Draws one successor uniformly, ignoring the probabilities.
	///
	/// # Errors
	/// Returns `ModelError::EmptyDistribution` if there is nothing to draw.
	pub fn sample_uniform<R: Rng>(&self, rng: &mut R) -> Result<&str> {
		super::sample_uniform(&self.successors, rng)
			.map_err(|_| ModelError::EmptyDistribution)
	}
}
