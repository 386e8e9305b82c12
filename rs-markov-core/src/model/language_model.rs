use std::fmt;
use std::path::Path;

use log::{debug, trace};
use rand::rngs::StdRng;

use super::random_source::{RandomSource, RngSource};
use super::window_table::WindowTable;
use crate::config::ModelConfig;
use crate::error::ModelError;
use crate::io;

/// Why a generation stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Termination {
	/// The requested number of characters was appended.
	TargetReached,
	/// The trailing window was never seen during training.
	UnseenWindow(String),
	/// The initial text is shorter than one window; nothing was appended.
	InitialTooShort,
}

/// Result of a generation, with the reason it stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
	/// Initial text followed by the generated continuation.
	pub text: String,
	/// Number of characters appended to the initial text.
	pub appended: usize,
	pub termination: Termination,
}

/// Fixed-order character language model.
///
/// # Responsibilities
/// - Own the window table and the random source
/// - Rebuild the table from scratch on every training
/// - Extend an initial text by sampling one character at a time
///
/// The default random source is a `StdRng`, seeded when the configuration
/// carries a seed. Any `RandomSource` can be injected with `with_source`.
#[derive(Debug)]
pub struct LanguageModel<S = RngSource<StdRng>> {
	table: WindowTable,
	source: S,
}

impl LanguageModel {
	/// Creates an untrained model from a configuration.
	///
	/// # Errors
	/// Returns an error if the window length is 0.
	pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
		config.validate()?;
		Self::with_source(config.window_length, RngSource::from_seed_option(config.seed))
	}
}

impl<S: RandomSource> LanguageModel<S> {
	/// Creates an untrained model drawing from `source`.
	///
	/// # Errors
	/// Returns an error if `window_length` is 0.
	pub fn with_source(window_length: usize, source: S) -> Result<Self, ModelError> {
		Ok(Self { table: WindowTable::new(window_length)?, source })
	}

	pub fn window_length(&self) -> usize {
		self.table.window_length()
	}

	/// Read-only view of the learned table.
	pub fn table(&self) -> &WindowTable {
		&self.table
	}

	/// Learns the window distributions of `corpus`.
	///
	/// Any previously learned table is discarded first, so counts of two
	/// corpora are never mixed.
	pub fn train(&mut self, corpus: &str) {
		self.table = self.table.retrained(corpus);
	}

	/// Reads a corpus file and trains on its whole content.
	pub fn train_file<P: AsRef<Path>>(&mut self, filename: P) -> Result<(), ModelError> {
		let corpus = io::read_corpus(filename)?;
		self.train(&corpus);
		Ok(())
	}

	/// Appends up to `target_length` sampled characters to `initial_text`.
	///
	/// Returns `initial_text` unchanged when it is shorter than one window.
	/// Stops early, without error, on a window that was never seen.
	pub fn generate(&mut self, initial_text: &str, target_length: usize) -> String {
		self.generate_detailed(initial_text, target_length).text
	}

	/// Same as `generate`, also reporting why generation stopped.
	pub fn generate_detailed(&mut self, initial_text: &str, target_length: usize) -> Generation {
		generate_with(&self.table, &mut self.source, initial_text, target_length)
	}
}

impl<S> fmt::Display for LanguageModel<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.table)
	}
}

/// Returns the last `n` characters of `text` (the whole text if shorter).
///
/// UTF-8 safe: slices on character boundaries.
fn trailing_window(text: &str, n: usize) -> &str {
	if n == 0 {
		return "";
	}
	match text.char_indices().rev().nth(n - 1) {
		Some((start, _)) => &text[start..],
		None => text,
	}
}

/// Generation loop over a shared table with a caller-owned random source.
///
/// Lets several threads generate from one trained table, each with its
/// own source.
pub fn generate_with<R: RandomSource + ?Sized>(
	table: &WindowTable,
	rng: &mut R,
	initial_text: &str,
	target_length: usize,
) -> Generation {
	let window_length = table.window_length();
	if initial_text.chars().count() < window_length {
		debug!("initial text shorter than window length {}, nothing generated", window_length);
		return Generation {
			text: initial_text.to_owned(),
			appended: 0,
			termination: Termination::InitialTooShort,
		};
	}

	let mut text = initial_text.to_owned();
	let mut appended = 0;
	let mut termination = Termination::TargetReached;

	while appended < target_length {
		let window = trailing_window(&text, window_length);
		let next_char = match table.get(window).and_then(|entry| entry.sample(&mut *rng)) {
			Some(c) => c,
			None => {
				termination = Termination::UnseenWindow(window.to_owned());
				break;
			}
		};
		trace!("{:?} -> {:?}", window, next_char);
		text.push(next_char);
		appended += 1;
	}

	debug!("generation stopped after {} characters: {:?}", appended, termination);
	Generation { text, appended, termination }
}
