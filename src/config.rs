use std::error::Error;
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "games.pgn";
pub const DEFAULT_OUTPUT: &str = "fen.csv";

/// Invocation settings: `tuning-samples [INPUT [OUTPUT]]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Input path or glob pattern.
    pub input: String,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    pub fn from_args<I>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        if let Some(input) = args.next() {
            config.input = input;
        }
        if let Some(output) = args.next() {
            config.output = PathBuf::from(output);
        }

        let extra: Vec<String> = args.collect();
        if !extra.is_empty() {
            return Err(format!(
                "Unexpected arguments: {}. Usage: tuning-samples [INPUT [OUTPUT]]",
                extra.join(" ")
            )
            .into());
        }

        if config.input.trim().is_empty() {
            return Err("Input path must not be empty".into());
        }

        Ok(config)
    }
}
