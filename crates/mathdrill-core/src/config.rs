//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{ModeKind, QuizSettings};

/// Top-level mathdrill configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathdrillConfig {
    /// Mode used when none is given on the command line.
    #[serde(default)]
    pub default_mode: ModeKind,
    /// Where session history is stored.
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,
    /// Default quiz settings.
    #[serde(default)]
    pub quiz: QuizSettings,
}

fn default_history_path() -> PathBuf {
    match dirs_path() {
        Some(dir) => dir.join("history.json"),
        None => PathBuf::from("mathdrill-history.json"),
    }
}

impl Default for MathdrillConfig {
    fn default() -> Self {
        Self {
            default_mode: ModeKind::default(),
            history_path: default_history_path(),
            quiz: QuizSettings::default(),
        }
    }
}

/// Expand `${VAR}` references from the environment. Unset variables expand
/// to nothing and an unterminated `${` is kept as is. Substituted values are
/// not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find("${") {
        let Some(close) = rest[open + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let name = &rest[open + 2..open + 2 + close];
        out.push_str(&std::env::var(name).unwrap_or_default());
        rest = &rest[open + 2 + close + 1..];
    }
    out.push_str(rest);
    out
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `mathdrill.toml` in the current directory
/// 2. `~/.config/mathdrill/config.toml`
///
/// `MATHDRILL_HISTORY` overrides the history path in every case.
pub fn load_config_from(path: Option<&Path>) -> Result<MathdrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mathdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MathdrillConfig::default(),
    };

    if let Ok(history) = std::env::var("MATHDRILL_HISTORY") {
        config.history_path = PathBuf::from(history);
    }

    Ok(config)
}

/// Parse a config document, expanding `${VAR}` in the history path and
/// clamping quiz settings into range.
pub fn parse_config(content: &str) -> Result<MathdrillConfig> {
    let mut config: MathdrillConfig = toml::from_str(content)?;
    config.history_path = PathBuf::from(resolve_env_vars(&config.history_path.to_string_lossy()));
    config.quiz = config.quiz.clamped();
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mathdrill"))
}

/// Starter config written by `mathdrill init`.
pub const SAMPLE_CONFIG: &str = r#"# mathdrill configuration

# marathon | sprint | survival
default_mode = "marathon"

# history_path = "${HOME}/.config/mathdrill/history.json"

[quiz]
# + | - | * | / | mixed
operation = "+"
first_digits = 2
second_digits = 2
# marathon only, 5..=50 in steps of 5
count = 10
# sprint only
duration_secs = 60
"#;
