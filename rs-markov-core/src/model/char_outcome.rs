use std::fmt;

/// One distinct character observed after a given window.
///
/// `count` grows while the corpus is scanned. `probability` and
/// `cumulative_probability` are written once, after every count of the
/// owning window is final, and never change afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct CharOutcome {
	character: char,
	count: usize,
	probability: f64,
	cumulative_probability: f64,
}

impl CharOutcome {
	/// Creates an outcome that has not been counted yet.
	pub(crate) fn new(character: char) -> Self {
		Self { character, count: 0, probability: 0.0, cumulative_probability: 0.0 }
	}

	/// Records one more occurrence of this character after its window.
	pub(crate) fn increment(&mut self) {
		self.count += 1;
	}

	/// Derives the probabilities from the window's total count.
	///
	/// Takes the cumulative probability of the previous outcome (0.0 for the
	/// first one) and returns this outcome's cumulative probability.
	pub(crate) fn set_probabilities(&mut self, total_count: usize, previous_cumulative: f64) -> f64 {
		self.probability = self.count as f64 / total_count as f64;
		self.cumulative_probability = previous_cumulative + self.probability;
		self.cumulative_probability
	}

	pub fn character(&self) -> char {
		self.character
	}

	pub fn count(&self) -> usize {
		self.count
	}

	pub fn probability(&self) -> f64 {
		self.probability
	}

	pub fn cumulative_probability(&self) -> f64 {
		self.cumulative_probability
	}
}

impl fmt::Display for CharOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"({} {} {} {})",
			self.character.escape_debug(),
			self.count,
			self.probability,
			self.cumulative_probability
		)
	}
}
