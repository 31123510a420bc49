use std::env;
use std::path::PathBuf;

use log::info;
use wordchain_core::io::resolve_path;
use wordchain_core::{Corpus, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Server settings read from the environment.
///
/// - `WORDCHAIN_HOST`: bind address (default `127.0.0.1`)
/// - `WORDCHAIN_PORT`: bind port (default `5000`)
/// - `WORDCHAIN_CORPUS`: corpus file, one sentence per line (default: built-in corpus)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	pub corpus: Option<PathBuf>,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: DEFAULT_HOST.to_owned(),
			port: DEFAULT_PORT,
			corpus: None,
		}
	}
}

impl ServerConfig {
	pub fn from_env() -> std::result::Result<Self, String> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	/// Builds the configuration from any key/value source.
	///
	/// Blank values are treated as missing.
	fn from_lookup<F>(lookup: F) -> std::result::Result<Self, String>
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
		let mut config = Self::default();

		if let Some(host) = get("WORDCHAIN_HOST") {
			config.host = host.trim().to_owned();
		}
		if let Some(port) = get("WORDCHAIN_PORT") {
			config.port = port
				.trim()
				.parse()
				.map_err(|_| format!("WORDCHAIN_PORT must be a port number, got '{}'", port))?;
		}
		config.corpus = get("WORDCHAIN_CORPUS").map(|path| resolve_path(path.trim()));

		Ok(config)
	}

	/// Loads the configured corpus, or the built-in one.
	pub fn load_corpus(&self) -> Result<Corpus> {
		match &self.corpus {
			Some(path) => {
				info!("Loading corpus from {}", path.display());
				Corpus::from_file(path)
			}
			None => {
				info!("Using built-in corpus");
				Ok(Corpus::builtin())
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |key| map.get(key).cloned()
	}

	#[test]
	fn defaults_when_unset() {
		let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
		assert_eq!(config, ServerConfig::default());
	}

	#[test]
	fn reads_values() {
		let config = ServerConfig::from_lookup(lookup(&[
			("WORDCHAIN_HOST", "0.0.0.0"),
			("WORDCHAIN_PORT", " 8080 "),
			("WORDCHAIN_CORPUS", "/srv/corpus.txt"),
		]))
		.unwrap();
		assert_eq!(config.host, "0.0.0.0");
		assert_eq!(config.port, 8080);
		assert_eq!(config.corpus, Some(PathBuf::from("/srv/corpus.txt")));
	}

	#[test]
	fn blank_values_are_ignored() {
		let config = ServerConfig::from_lookup(lookup(&[("WORDCHAIN_HOST", "  "), ("WORDCHAIN_CORPUS", "")])).unwrap();
		assert_eq!(config.host, DEFAULT_HOST);
		assert_eq!(config.corpus, None);
	}

	#[test]
	fn invalid_port() {
		assert!(ServerConfig::from_lookup(lookup(&[("WORDCHAIN_PORT", "http")])).is_err());
		assert!(ServerConfig::from_lookup(lookup(&[("WORDCHAIN_PORT", "70000")])).is_err());
	}

	#[test]
	fn builtin_corpus_by_default() {
		let corpus = ServerConfig::default().load_corpus().unwrap();
		assert_eq!(corpus, Corpus::builtin());
	}
}
