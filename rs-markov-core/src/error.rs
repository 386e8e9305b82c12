use thiserror::Error;

/// Errors raised while configuring or feeding a language model.
///
/// Running out of data is never an error: a short corpus yields an empty
/// table, and generation simply stops on an unseen window.
#[derive(Error, Debug)]
pub enum ModelError {
	#[error("window length must be >= 1, got {0}")]
	InvalidWindowLength(usize),

	#[error("invalid configuration: {0}")]
	Config(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}
