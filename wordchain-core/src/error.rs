use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the transition model and its helpers.
///
/// Querying an unknown context is *not* an error: `get_distribution` returns
/// an empty `Distribution` for it. Errors only appear when a caller asks to
/// sample from something that has nothing to sample.
#[derive(Error, Debug)]
pub enum ModelError {
	#[error("Cannot sample from an empty distribution")]
	EmptyDistribution,

	#[error("No successors learned for context '{0}'")]
	UnknownContext(String),

	#[error("Cannot sample from an empty vocabulary")]
	EmptyVocabulary,

	#[error("Invalid weights: {0}")]
	InvalidWeights(String),

	#[error("Corpus file {} contains no sentences", .0.display())]
	EmptyCorpus(PathBuf),

	#[error("I/O error: {0}")]
	Io(#[from] io::Error),
}

/// Shorthand result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
