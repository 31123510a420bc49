//! Word-level Markov chain text generation.
//!
//! This crate provides a small next-token prediction toolkit:
//! - Whitespace-tokenized training corpora
//! - Transition counting between adjacent words
//! - Per-context probability distributions with weighted sampling
//! - Uniform (context-free) sampling for comparison
//! - Lazy, bounded sentence generation from a seed word
//!
//! Every sampling operation takes its random source as a parameter, so a
//! seeded generator makes results reproducible.

/// Core model, distributions and generation logic.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
pub mod io;

pub use error::{ModelError, Result};
pub use model::corpus::{Corpus, DEFAULT_SENTENCES};
pub use model::distribution::Distribution;
pub use model::generator::{Generation, GenerationState, StartSeed};
pub use model::transition_model::TransitionModel;
