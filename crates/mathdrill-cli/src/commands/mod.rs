pub mod history;
pub mod init;
pub mod play;
pub mod problems;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use mathdrill_core::config::{load_config_from, MathdrillConfig};
use mathdrill_core::model::{parse_digits, ModeKind, OperationSetting, QuizSettings};

/// Quiz options shared by `play` and `problems`. Anything left unset falls
/// back to the config file.
#[derive(Debug, Clone, Args)]
pub struct QuizArgs {
    /// Game mode: marathon, sprint, survival
    #[arg(long)]
    pub mode: Option<ModeKind>,

    /// Operation: +, -, *, /, mixed
    #[arg(long, allow_hyphen_values = true)]
    pub operation: Option<OperationSetting>,

    /// Digits in the first number (1-3)
    #[arg(long, value_parser = parse_digits)]
    pub first_digits: Option<u8>,

    /// Digits in the second number (1-3)
    #[arg(long, value_parser = parse_digits)]
    pub second_digits: Option<u8>,

    /// Marathon problem count (5-50, step 5)
    #[arg(long)]
    pub count: Option<usize>,

    /// Sprint duration in seconds
    #[arg(long)]
    pub duration: Option<u64>,

    /// Seed for reproducible problem sequences
    #[arg(long)]
    pub seed: Option<u64>,
}

impl QuizArgs {
    /// Overlay the command-line options on the configured defaults.
    pub fn resolve(&self, config: &MathdrillConfig) -> (ModeKind, QuizSettings) {
        let defaults = &config.quiz;
        let settings = QuizSettings {
            operation: self.operation.unwrap_or(defaults.operation),
            first_digits: self.first_digits.unwrap_or(defaults.first_digits),
            second_digits: self.second_digits.unwrap_or(defaults.second_digits),
            count: self.count.unwrap_or(defaults.count),
            duration_secs: self.duration.unwrap_or(defaults.duration_secs),
        }
        .clamped();
        (self.mode.unwrap_or(config.default_mode), settings)
    }
}

/// Load the config, then let an explicit `--history` win over it.
pub fn load(config: Option<&Path>, history: Option<PathBuf>) -> Result<MathdrillConfig> {
    let mut config = load_config_from(config)?;
    if let Some(path) = history {
        config.history_path = path;
    }
    Ok(config)
}
