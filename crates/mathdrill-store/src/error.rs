//! History storage error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing a history file.
///
/// These stay inside the store: the [`HistoryStore`] impl logs them and
/// falls back to an empty history.
///
/// [`HistoryStore`]: mathdrill_core::history::HistoryStore
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to access history file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("history file {} is not valid JSON: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
}
