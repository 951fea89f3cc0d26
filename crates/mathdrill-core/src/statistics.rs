//! Session scoring and history trend statistics.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::model::{AnswerRecord, ModeKind, SessionSummary};

/// Reduce a session's answer records to a persisted summary.
///
/// Returns `None` for an empty session so that no zero/NaN entry ever
/// reaches history.
pub fn summarize(mode: ModeKind, results: &[AnswerRecord]) -> Option<SessionSummary> {
    let report = SessionReport::from_results(results)?;
    Some(SessionSummary {
        mode,
        score: report.score,
        total_questions: report.total_questions,
        avg_time: report.avg_time,
        timestamp: Utc::now(),
    })
}

/// Numbers shown on the results screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Correct answers.
    pub score: usize,
    /// Answered problems.
    pub total_questions: usize,
    /// Sum of per-answer times in seconds.
    pub total_time: f64,
    /// Mean per-answer time in seconds.
    pub avg_time: f64,
}

impl SessionReport {
    pub fn from_results(results: &[AnswerRecord]) -> Option<Self> {
        if results.is_empty() {
            return None;
        }
        let score = results.iter().filter(|r| r.correct).count();
        let total_time: f64 = results.iter().map(|r| r.time).sum();
        Some(Self {
            score,
            total_questions: results.len(),
            total_time,
            avg_time: total_time / results.len() as f64,
        })
    }

    /// Fraction of answers that were correct.
    pub fn accuracy(&self) -> f64 {
        self.score as f64 / self.total_questions as f64
    }
}

/// Trend over the stored summaries of one mode, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryTrend {
    pub games: usize,
    pub best_score: usize,
    /// Lowest average time of any game.
    pub fastest_avg_time: f64,
    pub latest_avg_time: f64,
    /// Latest minus previous average time; negative means faster.
    /// `None` until there are two games to compare.
    pub delta_avg_time: Option<f64>,
    /// Average time per game, in play order.
    pub avg_times: Vec<f64>,
}

impl HistoryTrend {
    pub fn from_history(history: &[SessionSummary]) -> Option<Self> {
        let latest = history.last()?;
        let avg_times: Vec<f64> = history.iter().map(|s| s.avg_time).collect();
        let fastest_avg_time = avg_times.iter().copied().fold(f64::INFINITY, f64::min);
        let best_score = history.iter().map(|s| s.score).max().unwrap_or(0);
        let delta_avg_time = match history {
            [.., previous, last] => Some(last.avg_time - previous.avg_time),
            _ => None,
        };

        Some(Self {
            games: history.len(),
            best_score,
            fastest_avg_time,
            latest_avg_time: latest.avg_time,
            delta_avg_time,
            avg_times,
        })
    }

    /// Whether the trend has enough points to plot.
    pub fn is_plottable(&self) -> bool {
        self.games >= 2
    }
}
