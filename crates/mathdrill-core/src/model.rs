//! Core data model types for mathdrill.
//!
//! These are the fundamental types that the rest of the system uses to
//! represent problems, answers, modes, and session summaries.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ParseError;

/// Number of problems pre-allocated for modes without a fixed count.
pub const UNBOUNDED_BATCH: usize = 999;

/// Smallest and largest marathon problem counts.
pub const MIN_COUNT: usize = 5;
pub const MAX_COUNT: usize = 50;
/// Marathon counts move in steps of this size.
pub const COUNT_STEP: usize = 5;

/// Smallest and largest operand digit counts.
pub const MIN_DIGITS: u8 = 1;
pub const MAX_DIGITS: u8 = 3;

/// A single arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl Operator {
    /// All operators, in the order `mixed` draws from.
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    /// Apply the operator. Division truncates; the generator only ever
    /// produces exact quotients.
    pub fn apply(self, lhs: i64, rhs: i64) -> i64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::Div => {
                if rhs == 0 {
                    0
                } else {
                    lhs / rhs
                }
            }
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Sub),
            "*" | "x" | "X" => Ok(Operator::Mul),
            "/" | "÷" => Ok(Operator::Div),
            other => Err(ParseError::UnknownOperation(other.to_string())),
        }
    }
}

/// The operation selector from the settings: a fixed operator or `mixed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OperationSetting {
    Single(Operator),
    /// A fresh operator is drawn uniformly for every problem.
    Mixed,
}

impl Default for OperationSetting {
    fn default() -> Self {
        OperationSetting::Single(Operator::Add)
    }
}

impl fmt::Display for OperationSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationSetting::Single(op) => write!(f, "{op}"),
            OperationSetting::Mixed => write!(f, "mixed"),
        }
    }
}

impl FromStr for OperationSetting {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("mixed") {
            return Ok(OperationSetting::Mixed);
        }
        s.parse().map(OperationSetting::Single)
    }
}

impl TryFrom<String> for OperationSetting {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OperationSetting> for String {
    fn from(value: OperationSetting) -> Self {
        value.to_string()
    }
}

/// Which game mode a session or summary belongs to, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    #[default]
    Marathon,
    Sprint,
    Survival,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeKind::Marathon => write!(f, "marathon"),
            ModeKind::Sprint => write!(f, "sprint"),
            ModeKind::Survival => write!(f, "survival"),
        }
    }
}

impl FromStr for ModeKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "marathon" => Ok(ModeKind::Marathon),
            "sprint" => Ok(ModeKind::Sprint),
            "survival" => Ok(ModeKind::Survival),
            other => Err(ParseError::UnknownMode(other.to_string())),
        }
    }
}

/// Termination and pacing policy of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Fixed number of problems, no time limit.
    Marathon { count: usize },
    /// As many problems as possible before the countdown runs out.
    Sprint { duration: Duration },
    /// Unbounded, ends on the first mistake.
    Survival,
}

impl Mode {
    /// Build the mode policy for `kind` from the relevant settings fields.
    pub fn from_settings(kind: ModeKind, settings: &QuizSettings) -> Self {
        match kind {
            ModeKind::Marathon => Mode::Marathon {
                count: settings.count,
            },
            ModeKind::Sprint => Mode::Sprint {
                duration: Duration::from_secs(settings.duration_secs),
            },
            ModeKind::Survival => Mode::Survival,
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Marathon { .. } => ModeKind::Marathon,
            Mode::Sprint { .. } => ModeKind::Sprint,
            Mode::Survival => ModeKind::Survival,
        }
    }

    /// How many problems to generate up front.
    pub fn batch_size(&self) -> usize {
        match self {
            Mode::Marathon { count } => *count,
            Mode::Sprint { .. } | Mode::Survival => UNBOUNDED_BATCH,
        }
    }

    /// `Some(count)` when the session ends after a fixed number of answers.
    pub fn problem_limit(&self) -> Option<usize> {
        match self {
            Mode::Marathon { count } => Some(*count),
            _ => None,
        }
    }

    pub fn time_limit(&self) -> Option<Duration> {
        match self {
            Mode::Sprint { duration } => Some(*duration),
            _ => None,
        }
    }

    /// Whether the first wrong answer ends the session.
    pub fn fails_fast(&self) -> bool {
        matches!(self, Mode::Survival)
    }
}

/// User-configurable quiz settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    /// Operator selection.
    #[serde(default)]
    pub operation: OperationSetting,
    /// Digits of the first operand.
    #[serde(default = "default_digits")]
    pub first_digits: u8,
    /// Digits of the second operand.
    #[serde(default = "default_digits")]
    pub second_digits: u8,
    /// Marathon problem count.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Sprint countdown in seconds.
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,
}

fn default_digits() -> u8 {
    2
}

fn default_count() -> usize {
    10
}

fn default_duration_secs() -> u64 {
    60
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            operation: OperationSetting::default(),
            first_digits: default_digits(),
            second_digits: default_digits(),
            count: default_count(),
            duration_secs: default_duration_secs(),
        }
    }
}

impl QuizSettings {
    /// Pull every field back into its valid range.
    ///
    /// Digits go to `1..=3`, the marathon count to a multiple of 5 within
    /// `5..=50`, and the sprint duration to at least one second.
    pub fn clamped(mut self) -> Self {
        self.first_digits = self.first_digits.clamp(MIN_DIGITS, MAX_DIGITS);
        self.second_digits = self.second_digits.clamp(MIN_DIGITS, MAX_DIGITS);
        self.count = (self.count.clamp(MIN_COUNT, MAX_COUNT) / COUNT_STEP) * COUNT_STEP;
        self.duration_secs = self.duration_secs.max(1);
        self
    }
}

/// Validate a digit count from user input.
pub fn parse_digits(s: &str) -> Result<u8, ParseError> {
    let value: u32 = s
        .trim()
        .parse()
        .map_err(|_| ParseError::DigitsOutOfRange(0))?;
    if (MIN_DIGITS as u32..=MAX_DIGITS as u32).contains(&value) {
        Ok(value as u8)
    } else {
        Err(ParseError::DigitsOutOfRange(value))
    }
}

/// One arithmetic question with its precomputed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub num1: i64,
    pub num2: i64,
    pub op: Operator,
    pub answer: i64,
    /// Opaque key for the presentation layer.
    pub id: Uuid,
}

impl Problem {
    /// Decimal string of the answer; its length drives the survival
    /// early-failure rule.
    pub fn answer_text(&self) -> String {
        self.answer.to_string()
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.num1, self.op, self.num2)
    }
}

/// The outcome of one answered problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    #[serde(flatten)]
    pub problem: Problem,
    /// Raw submitted text.
    pub user_answer: String,
    pub correct: bool,
    /// Seconds from presentation to submission.
    pub time: f64,
}

/// Aggregate statistics for one completed session, as persisted to history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub mode: ModeKind,
    pub score: usize,
    pub total_questions: usize,
    pub avg_time: f64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}
