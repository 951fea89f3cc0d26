//! mathdrill-store: File-backed session history.
//!
//! Persists [`SessionSummary`](mathdrill_core::model::SessionSummary) records
//! as a JSON array of `{mode, score, totalQuestions, avgTime, timestamp}`
//! objects, with `timestamp` in epoch milliseconds.

pub mod error;
pub mod json;

pub use error::HistoryError;
pub use json::JsonFileHistory;
