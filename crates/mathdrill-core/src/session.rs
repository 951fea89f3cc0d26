//! Quiz session state machine.
//!
//! A [`Session`] walks through a problem sequence under a [`Mode`] policy:
//!
//! ```text
//! Idle --start--> Active --(last answer | first mistake | timeout)--> Finished
//!                   |
//!                   +--abort--> Aborted
//! ```
//!
//! All timing is passed in by the caller as [`Instant`]s, so the machine never
//! reads the clock itself and tests can drive it deterministically.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::evaluator::{evaluate, evaluate_submission, AnswerStatus};
use crate::generator::ProblemGenerator;
use crate::model::{AnswerRecord, Mode, Problem, QuizSettings, SessionSummary};
use crate::statistics::summarize;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Active,
    Finished,
    Aborted,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Finished | SessionState::Aborted)
    }
}

/// One run through a sequence of problems.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    mode: Mode,
    settings: QuizSettings,
    generator: ProblemGenerator,
    problems: Vec<Problem>,
    current_index: usize,
    results: Vec<AnswerRecord>,
    state: SessionState,
    started_at: Option<Instant>,
    problem_started_at: Option<Instant>,
    remaining: Option<Duration>,
}

impl Session {
    /// Create an idle session with its initial problem batch.
    pub fn new(mode: Mode, settings: QuizSettings, mut generator: ProblemGenerator) -> Self {
        let problems = generator.batch(&mode, &settings);
        Self {
            id: Uuid::new_v4(),
            mode,
            settings,
            generator,
            problems,
            current_index: 0,
            results: Vec::new(),
            state: SessionState::Idle,
            started_at: None,
            problem_started_at: None,
            remaining: None,
        }
    }

    /// Create a session and start it at `now`.
    pub fn begin(
        mode: Mode,
        settings: QuizSettings,
        generator: ProblemGenerator,
        now: Instant,
    ) -> Self {
        let mut session = Self::new(mode, settings, generator);
        session.start(now);
        session
    }

    /// Move from `Idle` to `Active`, starting the stopwatch and, for sprint,
    /// the countdown. Has no effect in any other state.
    pub fn start(&mut self, now: Instant) {
        if self.state != SessionState::Idle {
            return;
        }
        self.state = SessionState::Active;
        self.started_at = Some(now);
        self.problem_started_at = Some(now);
        self.remaining = self.mode.time_limit();
        tracing::debug!(
            session = %self.id,
            mode = %self.mode.kind(),
            problems = self.problems.len(),
            "session started"
        );
    }

    /// Feed the current contents of the input box.
    ///
    /// Commits as soon as the input resolves: `Correct` in every mode,
    /// `Wrong` only where the mode fails fast. Pending input changes nothing.
    pub fn observe_input(&mut self, raw: &str, now: Instant) -> AnswerStatus {
        let Some(problem) = self.current_problem() else {
            return AnswerStatus::Pending;
        };
        let status = evaluate(problem, raw, &self.mode);
        if status.is_resolved() {
            self.commit(raw, status == AnswerStatus::Correct, now);
        }
        status
    }

    /// Explicitly submit `raw` for the current problem.
    ///
    /// Numeric input always resolves and commits. Input with no number in it
    /// stays `Pending`. Sessions that are not active ignore submissions and
    /// report `Pending`.
    pub fn submit_answer(&mut self, raw: &str, now: Instant) -> AnswerStatus {
        let Some(problem) = self.current_problem() else {
            tracing::debug!(session = %self.id, state = ?self.state, "submission ignored");
            return AnswerStatus::Pending;
        };
        let status = evaluate_submission(problem, raw);
        if status.is_resolved() {
            self.commit(raw, status == AnswerStatus::Correct, now);
        }
        status
    }

    /// Recompute the sprint countdown at `now`.
    ///
    /// Idempotent: repeated calls with the same `now` leave `remaining`
    /// unchanged, and an earlier `now` never winds the clock back. Reaching
    /// zero finishes the session immediately; an unanswered problem is not
    /// recorded. No-op outside an active sprint.
    pub fn tick(&mut self, now: Instant) {
        if self.state != SessionState::Active {
            return;
        }
        let (Some(limit), Some(started_at)) = (self.mode.time_limit(), self.started_at) else {
            return;
        };
        let computed = limit.saturating_sub(now.saturating_duration_since(started_at));
        let remaining = self.remaining.map_or(computed, |r| r.min(computed));
        self.remaining = Some(remaining);
        if remaining.is_zero() {
            tracing::debug!(session = %self.id, answered = self.results.len(), "time is up");
            self.finish();
        }
    }

    /// Abandon the session. Committed answers stay readable but the session
    /// will never produce a summary. Returns how many answers were discarded.
    pub fn abort(&mut self) -> usize {
        if self.state != SessionState::Active {
            return 0;
        }
        self.state = SessionState::Aborted;
        tracing::info!(session = %self.id, discarded = self.results.len(), "session aborted");
        self.results.len()
    }

    /// Summary of a finished session; `None` if it is not finished or has
    /// no answers.
    pub fn finalize(&self) -> Option<SessionSummary> {
        if self.state != SessionState::Finished {
            return None;
        }
        summarize(self.mode.kind(), &self.results)
    }

    fn commit(&mut self, raw: &str, correct: bool, now: Instant) {
        let problem = self.problems[self.current_index].clone();
        let presented_at = self.problem_started_at.unwrap_or(now);
        let time = now.saturating_duration_since(presented_at).as_secs_f64();
        self.results.push(AnswerRecord {
            problem,
            user_answer: raw.to_string(),
            correct,
            time,
        });

        if self.mode.fails_fast() && !correct {
            self.finish();
            return;
        }

        if self.current_index + 1 >= self.problems.len() {
            if self.mode.problem_limit().is_some() {
                self.finish();
                return;
            }
            let more = self.generator.batch(&self.mode, &self.settings);
            tracing::debug!(session = %self.id, added = more.len(), "extending problem sequence");
            self.problems.extend(more);
        }

        self.current_index += 1;
        self.problem_started_at = Some(now);
    }

    fn finish(&mut self) {
        self.state = SessionState::Finished;
        let score = self.results.iter().filter(|r| r.correct).count();
        tracing::info!(
            session = %self.id,
            mode = %self.mode.kind(),
            score,
            answered = self.results.len(),
            "session finished"
        );
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The problem awaiting an answer, only while active.
    pub fn current_problem(&self) -> Option<&Problem> {
        if self.state != SessionState::Active {
            return None;
        }
        self.problems.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn problem_count(&self) -> usize {
        self.problems.len()
    }

    pub fn results(&self) -> &[AnswerRecord] {
        &self.results
    }

    /// Time left on the sprint countdown as of the last tick.
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Countdown in whole seconds for display: the duration minus the
    /// whole seconds elapsed.
    pub fn remaining_display_secs(&self) -> Option<u64> {
        self.remaining
            .map(|r| r.as_secs() + u64::from(r.subsec_nanos() > 0))
    }

    /// Completion in `0.0..=1.0`: time left for sprint, problems done
    /// otherwise. A finished count-based session reports `1.0`.
    pub fn progress(&self) -> f64 {
        match (self.mode.time_limit(), self.remaining) {
            (Some(limit), Some(remaining)) if !limit.is_zero() => {
                remaining.as_secs_f64() / limit.as_secs_f64()
            }
            _ if self.state == SessionState::Finished => 1.0,
            _ if self.problems.is_empty() => 0.0,
            _ => self.current_index as f64 / self.problems.len() as f64,
        }
    }
}
