//! Top-level module for the character Markov model.
//!
//! This module provides:
//! - Per-character outcome records (`CharOutcome`)
//! - The window-distribution table (`WindowEntry`, `WindowTable`)
//! - The injectable random source (`RandomSource`)
//! - The high-level model interface (`LanguageModel`)

/// High-level model: training from a corpus and text generation.
///
/// Owns the window table and the random source.
pub mod language_model;

/// Mapping from fixed-length windows to next-character distributions.
///
/// Handles corpus scanning, probability computation and weighted sampling.
pub mod window_table;

/// Count and probabilities of one character following one window.
pub mod char_outcome;

/// Uniform draw sources: seeded or entropy-backed `rand` generators, and scripted draws.
pub mod random_source;
