//! Session history storage.
//!
//! History is a bounded, append-only log of [`SessionSummary`] values shared
//! by all modes. It is a non-critical feature: implementations swallow their
//! own failures and degrade to an empty history instead of returning errors.

use std::collections::VecDeque;

use crate::model::{ModeKind, SessionSummary};

/// Maximum number of summaries kept across all modes.
pub const HISTORY_LIMIT: usize = 100;

/// Backing store for session summaries.
pub trait HistoryStore {
    /// Append a summary, evicting the globally oldest entries beyond
    /// [`HISTORY_LIMIT`].
    fn append(&mut self, summary: SessionSummary);

    /// Every stored summary, oldest first.
    fn all(&self) -> Vec<SessionSummary>;

    /// Summaries for one mode, oldest first.
    fn query(&self, mode: ModeKind) -> Vec<SessionSummary> {
        self.all().into_iter().filter(|s| s.mode == mode).collect()
    }
}

/// Push `summary` and drop from the front until at most `limit` remain.
pub fn push_bounded(entries: &mut VecDeque<SessionSummary>, summary: SessionSummary, limit: usize) {
    entries.push_back(summary);
    while entries.len() > limit {
        entries.pop_front();
    }
}

/// In-process history, lost when dropped.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: VecDeque<SessionSummary>,
    limit: usize,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for MemoryHistory {
    fn append(&mut self, summary: SessionSummary) {
        push_bounded(&mut self.entries, summary, self.limit);
    }

    fn all(&self) -> Vec<SessionSummary> {
        self.entries.iter().cloned().collect()
    }
}
