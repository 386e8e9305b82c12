use std::collections::HashMap;
use std::fmt;

use log::info;

use super::char_outcome::CharOutcome;
use super::random_source::RandomSource;
use crate::error::ModelError;

/// Distribution of the characters observed right after one window.
///
/// Outcomes are kept in first-observed order. That order fixes the
/// cumulative probabilities and therefore which character a given draw
/// selects.
///
/// # Invariants
/// - A trained entry holds at least one outcome
/// - Every outcome count is >= 1
/// - Probabilities sum to 1.0 and the last cumulative probability is 1.0
///   (up to floating-point rounding)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WindowEntry {
	outcomes: Vec<CharOutcome>,
}

impl WindowEntry {
	/// Counts one occurrence of `next_char` after this window.
	///
	/// Unknown characters are appended at the end with a fresh count.
	fn record(&mut self, next_char: char) {
		match self.outcomes.iter_mut().find(|outcome| outcome.character() == next_char) {
			Some(outcome) => outcome.increment(),
			None => {
				let mut outcome = CharOutcome::new(next_char);
				outcome.increment();
				self.outcomes.push(outcome);
			}
		}
	}

	/// Computes probability and cumulative probability of every outcome, in stored order.
	fn calculate_probabilities(&mut self) {
		let total_count = self.total_count();
		let mut cumulative = 0.0;
		for outcome in &mut self.outcomes {
			cumulative = outcome.set_probabilities(total_count, cumulative);
		}
	}

	/// Outcomes in first-observed order.
	pub fn outcomes(&self) -> &[CharOutcome] {
		&self.outcomes
	}

	/// Number of times this window was followed by any character.
	pub fn total_count(&self) -> usize {
		self.outcomes.iter().map(CharOutcome::count).sum()
	}

	pub fn len(&self) -> usize {
		self.outcomes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.outcomes.is_empty()
	}

	/// Selects the character matching the draw `r` in `[0.0, 1.0)`.
	///
	/// Returns the first outcome whose cumulative probability is strictly
	/// greater than `r`. When rounding leaves every cumulative value at or
	/// below `r`, the last outcome is returned. `None` only for an empty entry.
	pub fn pick(&self, r: f64) -> Option<char> {
		self.outcomes
			.iter()
			.find(|outcome| outcome.cumulative_probability() > r)
			.or_else(|| self.outcomes.last())
			.map(CharOutcome::character)
	}

	/// Draws once from `rng` and selects the matching character.
	pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<char> {
		if self.outcomes.is_empty() {
			return None;
		}
		self.pick(rng.next_f64())
	}
}

impl fmt::Display for WindowEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, outcome) in self.outcomes.iter().enumerate() {
			if i > 0 {
				write!(f, " ")?;
			}
			write!(f, "{}", outcome)?;
		}
		Ok(())
	}
}

/// Maps every observed window of `window_length` characters to the
/// distribution of the character that follows it.
///
/// A table is built in one pass from a single corpus and is read-only
/// afterwards. It can be shared between threads for concurrent generation,
/// each thread bringing its own random source.
///
/// # Invariants
/// - `window_length >= 1`
/// - Every key is exactly `window_length` characters long
/// - Every entry is non-empty and normalized
#[derive(Clone, Debug, PartialEq)]
pub struct WindowTable {
	window_length: usize,
	windows: HashMap<String, WindowEntry>,
}

impl WindowTable {
	/// Creates an empty table.
	///
	/// # Errors
	/// Returns an error if `window_length` is 0.
	pub fn new(window_length: usize) -> Result<Self, ModelError> {
		if window_length == 0 {
			return Err(ModelError::InvalidWindowLength(window_length));
		}
		Ok(Self { window_length, windows: HashMap::new() })
	}

	/// Builds a table from a corpus.
	///
	/// A corpus shorter than `window_length + 1` characters yields an empty table.
	///
	/// # Errors
	/// Returns an error if `window_length` is 0.
	pub fn from_corpus(corpus: &str, window_length: usize) -> Result<Self, ModelError> {
		Ok(Self::new(window_length)?.retrained(corpus))
	}

	/// Builds a fresh table with the same window length from `corpus`.
	///
	/// `self` is left untouched; nothing of its content is carried over.
	pub fn retrained(&self, corpus: &str) -> Self {
		let mut table = Self { window_length: self.window_length, windows: HashMap::new() };
		table.count(corpus);
		table.finalize();
		info!(
			"trained {} windows of length {} over {} characters",
			table.windows.len(),
			table.window_length,
			corpus.chars().count()
		);
		table
	}

	/// Scans every window of the corpus and counts the character following it.
	///
	/// Windows are borrowed slices of the corpus; a key is only allocated the
	/// first time a window is seen.
	fn count(&mut self, corpus: &str) {
		let chars: Vec<(usize, char)> = corpus.char_indices().collect();

		for i in 0..chars.len().saturating_sub(self.window_length) {
			let (start, _) = chars[i];
			let (end, next_char) = chars[i + self.window_length];
			let window = &corpus[start..end];

			match self.windows.get_mut(window) {
				Some(entry) => entry.record(next_char),
				None => {
					let mut entry = WindowEntry::default();
					entry.record(next_char);
					self.windows.insert(window.to_owned(), entry);
				}
			}
		}
	}

	fn finalize(&mut self) {
		for entry in self.windows.values_mut() {
			entry.calculate_probabilities();
		}
	}

	pub fn window_length(&self) -> usize {
		self.window_length
	}

	/// Number of distinct windows.
	pub fn len(&self) -> usize {
		self.windows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.windows.is_empty()
	}

	/// Looks up the distribution following `window`.
	pub fn get(&self, window: &str) -> Option<&WindowEntry> {
		self.windows.get(window)
	}

	/// Iterates over windows and their entries, in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &WindowEntry)> {
		self.windows.iter().map(|(window, entry)| (window.as_str(), entry))
	}
}

/// Human-readable dump, one `window : outcomes` line per window, sorted by window.
impl fmt::Display for WindowTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut windows: Vec<(&str, &WindowEntry)> = self.iter().collect();
		windows.sort_by(|a, b| a.0.cmp(b.0));
		for (window, entry) in windows {
			writeln!(f, "{} : {}", window.escape_debug(), entry)?;
		}
		Ok(())
	}
}
