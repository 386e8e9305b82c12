//! Character-level Markov text generation library.
//!
//! This crate provides a fixed-order character model including:
//! - A window-distribution table learned from a training corpus
//! - Weighted sampling of the next character from cumulative probabilities
//! - A seedable, injectable random source
//! - Configuration and corpus I/O helpers
//!
//! ```
//! use rs_markov_core::config::ModelConfig;
//! use rs_markov_core::model::language_model::LanguageModel;
//!
//! let mut model = LanguageModel::new(&ModelConfig::new(2, Some(42)).unwrap()).unwrap();
//! model.train("aabcaabcaabc");
//! assert_eq!(model.generate("aa", 4), "aabcaa");
//! ```

/// Window table, sampling and the high-level language model.
pub mod model;

/// Model construction options.
pub mod config;

/// Error types.
pub mod error;

/// Corpus file helpers.
pub mod io;
