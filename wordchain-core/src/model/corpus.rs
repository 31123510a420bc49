use std::collections::HashSet;
use std::path::Path;

use crate::error::{ModelError, Result};
use crate::io::read_file;

/// Sentences used when no corpus file is supplied.
pub const DEFAULT_SENTENCES: [&str; 8] = [
	"i want coffee",
	"i want coffee",
	"i want tea",
	"can i have coffee",
	"can i have juice",
	"i want juice",
	"tea please",
	"coffee please",
];

/// An ordered, immutable collection of tokenized training sentences.
///
/// Tokens are obtained by splitting each sentence on whitespace. Sentences with
/// no tokens (blank lines) are dropped at construction time, so every stored
/// sentence holds at least one token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
	sentences: Vec<Vec<String>>,
}

impl Corpus {
	/// Tokenizes every sentence on whitespace.
	pub fn from_sentences<I, S>(sentences: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let sentences = sentences
			.into_iter()
			.map(|sentence| {
				sentence
					.as_ref()
					.split_whitespace()
					.map(str::to_owned)
					.collect::<Vec<_>>()
			})
			.filter(|tokens| !tokens.is_empty())
			.collect();
		Self { sentences }
	}

	/// Loads a corpus from a text file, one sentence per line.
	///
	/// # Errors
	/// - `ModelError::Io` if the file cannot be read.
	/// - `ModelError::EmptyCorpus` if the file holds no non-blank line.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let corpus = Self::from_sentences(read_file(&path)?);
		if corpus.is_empty() {
			return Err(ModelError::EmptyCorpus(path.as_ref().to_path_buf()));
		}
		Ok(corpus)
	}

	/// The built-in coffee/tea/juice corpus.
	pub fn builtin() -> Self {
		Self::from_sentences(DEFAULT_SENTENCES)
	}

	pub fn sentences(&self) -> &[Vec<String>] {
		&self.sentences
	}

	pub fn len(&self) -> usize {
		self.sentences.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sentences.is_empty()
	}

	/// Every distinct token, in the order it first appears.
	pub fn vocabulary(&self) -> Vec<String> {
		let mut seen: HashSet<&String> = HashSet::new();
		self.sentences
			.iter()
			.flatten()
			.filter(|token| seen.insert(*token))
			.cloned()
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_on_any_whitespace_and_drops_blank_lines() {
		let corpus = Corpus::from_sentences(["  i   want\tcoffee ", "", "   ", "tea"]);
		assert_eq!(corpus.len(), 2);
		assert_eq!(corpus.sentences()[0], vec!["i", "want", "coffee"]);
		assert_eq!(corpus.sentences()[1], vec!["tea"]);
	}

	#[test]
	fn vocabulary_is_first_seen_and_distinct() {
		let corpus = Corpus::from_sentences(["i want coffee", "can i have tea", "coffee please"]);
		assert_eq!(
			corpus.vocabulary(),
			vec!["i", "want", "coffee", "can", "have", "tea", "please"]
		);
	}

	#[test]
	fn builtin_corpus() {
		let corpus = Corpus::builtin();
		assert_eq!(corpus.len(), DEFAULT_SENTENCES.len());
		assert_eq!(corpus.vocabulary().len(), 8);
	}

	#[test]
	fn empty_file_is_rejected() {
		let path = std::env::temp_dir().join(format!("wordchain-empty-{}.txt", std::process::id()));
		std::fs::write(&path, "\n  \n").unwrap();

		let result = Corpus::from_file(&path);
		assert!(matches!(result, Err(ModelError::EmptyCorpus(_))));

		std::fs::remove_file(&path).unwrap();
	}
}
