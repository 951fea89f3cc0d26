//! Quiz controller.
//!
//! Owns the selected mode and settings, at most one live [`Session`], and
//! the history it reports to. Control signals (start, submit, tick, abort)
//! carry a [`SessionTicket`]; a ticket from a superseded session is ignored,
//! so a late timer tick can never touch a session that was already replaced.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::evaluator::AnswerStatus;
use crate::generator::ProblemGenerator;
use crate::history::HistoryStore;
use crate::model::{Mode, ModeKind, QuizSettings, SessionSummary};
use crate::session::{Session, SessionState};

/// Identifies the session a control signal was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionTicket {
    generation: u64,
}

/// Drives sessions and persists their summaries.
pub struct Quiz<H: HistoryStore> {
    mode: ModeKind,
    settings: QuizSettings,
    history: H,
    seeds: StdRng,
    session: Option<Session>,
    generation: u64,
    last_summary: Option<SessionSummary>,
    persisted: bool,
}

impl<H: HistoryStore> Quiz<H> {
    /// Settings are clamped into range. With `seed`, every session the quiz
    /// starts gets a reproducible problem sequence.
    pub fn new(mode: ModeKind, settings: QuizSettings, history: H, seed: Option<u64>) -> Self {
        let seeds = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            mode,
            settings: settings.clamped(),
            history,
            seeds,
            session: None,
            generation: 0,
            last_summary: None,
            persisted: false,
        }
    }

    /// Start a new session, discarding any session still in progress.
    pub fn start(&mut self, now: Instant) -> SessionTicket {
        if let Some(session) = self.session.as_mut() {
            session.abort();
        }
        self.generation += 1;
        self.last_summary = None;
        self.persisted = false;

        let mode = Mode::from_settings(self.mode, &self.settings);
        let generator = ProblemGenerator::from_seed(self.seeds.gen());
        self.session = Some(Session::begin(mode, self.settings.clone(), generator, now));
        SessionTicket {
            generation: self.generation,
        }
    }

    /// Start over with the same mode and settings.
    pub fn retry(&mut self, now: Instant) -> SessionTicket {
        self.start(now)
    }

    /// Abort the current session and return to idle. Nothing is persisted.
    /// Returns `false` if the ticket is stale.
    pub fn abort(&mut self, ticket: SessionTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        if let Some(mut session) = self.session.take() {
            session.abort();
        }
        self.generation += 1;
        true
    }

    /// Explicit submit for the current problem.
    pub fn submit(&mut self, ticket: SessionTicket, raw: &str, now: Instant) -> AnswerStatus {
        let status = match self.current_mut(ticket) {
            Some(session) => session.submit_answer(raw, now),
            None => return AnswerStatus::Pending,
        };
        self.persist_if_finished();
        status
    }

    /// Live input for the current problem.
    pub fn observe(&mut self, ticket: SessionTicket, raw: &str, now: Instant) -> AnswerStatus {
        let status = match self.current_mut(ticket) {
            Some(session) => session.observe_input(raw, now),
            None => return AnswerStatus::Pending,
        };
        self.persist_if_finished();
        status
    }

    /// Periodic countdown tick. Stale tickets are ignored.
    pub fn tick(&mut self, ticket: SessionTicket, now: Instant) {
        let Some(session) = self.current_mut(ticket) else {
            tracing::trace!("ignoring tick for superseded session");
            return;
        };
        session.tick(now);
        self.persist_if_finished();
    }

    pub fn is_current(&self, ticket: SessionTicket) -> bool {
        ticket.generation == self.generation && self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.session
            .as_ref()
            .map_or(SessionState::Idle, Session::state)
    }

    pub fn mode(&self) -> ModeKind {
        self.mode
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Summary written by the most recently finished session, if any.
    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Stored summaries for the current mode, oldest first.
    pub fn mode_history(&self) -> Vec<SessionSummary> {
        self.history.query(self.mode)
    }

    fn current_mut(&mut self, ticket: SessionTicket) -> Option<&mut Session> {
        if ticket.generation != self.generation {
            return None;
        }
        self.session.as_mut()
    }

    fn persist_if_finished(&mut self) {
        if self.persisted {
            return;
        }
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if session.state() != SessionState::Finished {
            return;
        }
        self.persisted = true;
        match session.finalize() {
            Some(summary) => {
                tracing::info!(
                    mode = %summary.mode,
                    score = summary.score,
                    total = summary.total_questions,
                    "recording session in history"
                );
                self.history.append(summary.clone());
                self.last_summary = Some(summary);
            }
            None => tracing::debug!("finished session has no answers, skipping history"),
        }
    }
}
