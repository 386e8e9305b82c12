use std::path::PathBuf;

use clap::Parser;
use log::warn;

use rs_markov_core::config::ModelConfig;
use rs_markov_core::io::read_corpus;
use rs_markov_core::model::language_model::{Generation, LanguageModel, Termination};

/// Train a character Markov model on a corpus file and generate text from it.
#[derive(Parser, Debug)]
#[command(name = "rs-markov", version)]
struct Cli {
	/// Corpus file used for training
	corpus: PathBuf,

	/// TOML configuration file (`window_length`, `seed`)
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Number of characters forming the context window (overrides the config file)
	#[arg(short, long)]
	window_length: Option<usize>,

	/// Seed for reproducible output (overrides the config file)
	#[arg(short, long)]
	seed: Option<u64>,

	/// Text to start generating from (first window of the corpus when omitted)
	#[arg(short, long)]
	initial: Option<String>,

	/// Number of characters to append
	#[arg(short, long, default_value_t = 100)]
	length: usize,

	/// Print the learned table before the generated text
	#[arg(long)]
	dump: bool,
}

impl Cli {
	/// Configuration file values, overridden by command-line flags.
	fn model_config(&self) -> Result<ModelConfig, Box<dyn std::error::Error>> {
		let mut config = match &self.config {
			Some(path) => ModelConfig::load(path)?,
			None => ModelConfig::default(),
		};
		if let Some(window_length) = self.window_length {
			config.window_length = window_length;
		}
		if self.seed.is_some() {
			config.seed = self.seed;
		}
		config.validate()?;
		Ok(config)
	}

	/// `--initial` if given, otherwise the first `window_length` characters of the corpus.
	fn initial_text(&self, corpus: &str, window_length: usize) -> String {
		match &self.initial {
			Some(text) => text.clone(),
			None => corpus.chars().take(window_length).collect(),
		}
	}
}

/// Trains on the corpus file and generates from the chosen initial text.
fn run(cli: &Cli) -> Result<(LanguageModel, Generation), Box<dyn std::error::Error>> {
	let config = cli.model_config()?;
	let corpus = read_corpus(&cli.corpus)?;

	let mut model = LanguageModel::new(&config)?;
	model.train(&corpus);

	let initial = cli.initial_text(&corpus, config.window_length);
	let generation = model.generate_detailed(&initial, cli.length);
	Ok((model, generation))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	let cli = Cli::parse();
	let (model, generation) = run(&cli)?;

	if cli.dump {
		println!("{}", model);
	}

	match &generation.termination {
		Termination::TargetReached => (),
		Termination::UnseenWindow(window) => {
			warn!("stopped after {} characters on unseen window {:?}", generation.appended, window)
		}
		Termination::InitialTooShort => {
			warn!("initial text shorter than {} characters, nothing generated", model.window_length())
		}
	}
	println!("{}", generation.text);

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn cli_definition_is_valid() {
		Cli::command().debug_assert();
	}

	#[test]
	fn flags_override_defaults() {
		let cli = Cli::parse_from(["rs-markov", "corpus.txt", "-w", "3", "-s", "42", "--length", "20"]);
		assert_eq!(cli.model_config().unwrap(), ModelConfig { window_length: 3, seed: Some(42) });
		assert_eq!(cli.initial, None);
		assert_eq!(cli.length, 20);
		assert!(!cli.dump);
	}

	#[test]
	fn zero_window_length_is_rejected() {
		let cli = Cli::parse_from(["rs-markov", "corpus.txt", "-w", "0"]);
		assert!(cli.model_config().is_err());
	}

	#[test]
	fn default_run_starts_from_the_corpus() {
		let dir = tempfile::tempdir().unwrap();
		let corpus = dir.path().join("corpus.txt");
		std::fs::write(&corpus, "The cat sat. The dog ran. The end came. ".repeat(20)).unwrap();

		let cli = Cli::parse_from(["rs-markov", corpus.to_str().unwrap(), "-s", "42"]);
		let (model, generation) = run(&cli).unwrap();

		assert_eq!(model.window_length(), 5);
		assert!(generation.text.starts_with("The c"));
		assert_eq!(generation.termination, Termination::TargetReached);
		assert_eq!(generation.appended, 100);
	}

	#[test]
	fn explicit_initial_text_is_kept() {
		let cli = Cli::parse_from(["rs-markov", "corpus.txt", "-i", "Once upon"]);
		assert_eq!(cli.initial_text("The cat sat.", 5), "Once upon");

		let cli = Cli::parse_from(["rs-markov", "corpus.txt"]);
		assert_eq!(cli.initial_text("héllo wörld", 5), "héllo");
		assert_eq!(cli.initial_text("ab", 5), "ab");
	}

	#[test]
	fn flags_override_config_file() {
		let dir = tempfile::tempdir().unwrap();
		let config = dir.path().join("model.toml");
		std::fs::write(&config, "window_length = 3\nseed = 9\n").unwrap();

		let config = config.to_str().unwrap();

		let cli = Cli::parse_from(["rs-markov", "corpus.txt", "-c", config]);
		assert_eq!(cli.model_config().unwrap(), ModelConfig { window_length: 3, seed: Some(9) });

		let cli = Cli::parse_from(["rs-markov", "corpus.txt", "-c", config, "-w", "4"]);
		assert_eq!(cli.model_config().unwrap(), ModelConfig { window_length: 4, seed: Some(9) });
	}
}
