//! JSON file history.

use std::collections::VecDeque;
use std::io::Write;
use std::path::{Path, PathBuf};

use mathdrill_core::history::{push_bounded, HistoryStore, HISTORY_LIMIT};
use mathdrill_core::model::SessionSummary;

use crate::error::HistoryError;

/// History kept in a single JSON file.
///
/// Every operation reads the file afresh, so several processes appending
/// in turn see each other's sessions. Writes go through a temp file and a
/// rename so a crash never leaves a half-written history behind.
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    path: PathBuf,
    limit: usize,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            limit: HISTORY_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all stored summaries. A missing file is an empty history.
    pub fn load(&self) -> Result<VecDeque<SessionSummary>, HistoryError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(VecDeque::new()),
            Err(source) => {
                return Err(HistoryError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(VecDeque::new());
        }
        let mut entries: VecDeque<SessionSummary> =
            serde_json::from_str(&content).map_err(|source| HistoryError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        while entries.len() > self.limit {
            entries.pop_front();
        }
        Ok(entries)
    }

    /// Replace the stored history with `entries`.
    pub fn save(&self, entries: &VecDeque<SessionSummary>) -> Result<(), HistoryError> {
        let json = serde_json::to_string_pretty(entries)?;
        let io_err = |source: std::io::Error| HistoryError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(io_err)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(io_err)?;
        tmp.write_all(json.as_bytes()).map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }

    /// Append with the usual eviction, reporting failures to the caller.
    ///
    /// An unreadable or corrupt file is left untouched; only this summary
    /// is lost.
    pub fn try_append(&self, summary: SessionSummary) -> Result<(), HistoryError> {
        let mut entries = self.load()?;
        push_bounded(&mut entries, summary, self.limit);
        self.save(&entries)
    }
}

impl HistoryStore for JsonFileHistory {
    fn append(&mut self, summary: SessionSummary) {
        if let Err(e) = self.try_append(summary) {
            tracing::warn!("history not updated: {e}");
        }
    }

    fn all(&self) -> Vec<SessionSummary> {
        match self.load() {
            Ok(entries) => entries.into(),
            Err(e) => {
                tracing::warn!("ignoring unreadable history: {e}");
                Vec::new()
            }
        }
    }
}
