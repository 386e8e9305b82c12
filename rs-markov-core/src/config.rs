use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Window length used when none is configured.
pub const DEFAULT_WINDOW_LENGTH: usize = 5;

/// Construction options of a `LanguageModel`.
///
/// # Example (TOML)
/// ```toml
/// window_length = 5
/// seed = 42
/// ```
///
/// Without a `seed` the model draws from the operating system's entropy
/// and every run produces different text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ModelConfig {
	/// Number of characters forming the Markov context.
	pub window_length: usize,

	/// Optional seed for a reproducible random source.
	pub seed: Option<u64>,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self { window_length: DEFAULT_WINDOW_LENGTH, seed: None }
	}
}

impl ModelConfig {
	/// Creates a configuration, rejecting a zero window length.
	pub fn new(window_length: usize, seed: Option<u64>) -> Result<Self, ModelError> {
		let config = Self { window_length, seed };
		config.validate()?;
		Ok(config)
	}

	/// Checks that the window length is at least one character.
	pub fn validate(&self) -> Result<(), ModelError> {
		if self.window_length == 0 {
			return Err(ModelError::InvalidWindowLength(self.window_length));
		}
		Ok(())
	}

	/// Parses and validates a TOML document.
	pub fn from_toml_str(text: &str) -> Result<Self, ModelError> {
		let config: Self = toml::from_str(text).map_err(|e| ModelError::Config(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	/// Reads a TOML configuration file.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
		let text = std::fs::read_to_string(path)?;
		Self::from_toml_str(&text)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_is_valid() {
		let config = ModelConfig::default();
		assert_eq!(config.window_length, 5);
		assert_eq!(config.seed, None);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn zero_window_is_rejected() {
		assert!(matches!(ModelConfig::new(0, None), Err(ModelError::InvalidWindowLength(0))));
	}

	#[test]
	fn parses_toml() {
		let config = ModelConfig::from_toml_str("window_length = 3\nseed = 42\n").unwrap();
		assert_eq!(config, ModelConfig { window_length: 3, seed: Some(42) });
	}

	#[test]
	fn missing_keys_fall_back_to_defaults() {
		let config = ModelConfig::from_toml_str("seed = 7").unwrap();
		assert_eq!(config.window_length, DEFAULT_WINDOW_LENGTH);
		assert_eq!(config.seed, Some(7));
	}

	#[test]
	fn malformed_toml_is_a_config_error() {
		assert!(matches!(ModelConfig::from_toml_str("window_length = \"five\""), Err(ModelError::Config(_))));
		assert!(matches!(ModelConfig::from_toml_str("window_length = 0"), Err(ModelError::InvalidWindowLength(0))));
	}
}
