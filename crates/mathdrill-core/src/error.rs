//! Parse error types.
//!
//! Raised when user-facing strings (CLI flags, config values) do not name a
//! known operation, mode, or digit count. The engine itself has no error
//! paths; everything past this boundary is assumed valid.

use thiserror::Error;

/// Errors produced when parsing quiz settings from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The string is not one of `+ - * / mixed`.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// The string is not one of `marathon sprint survival`.
    #[error("unknown mode: {0}")]
    UnknownMode(String),

    /// Operand digit count outside `1..=3`.
    #[error("digit count must be between 1 and 3, got {0}")]
    DigitsOutOfRange(u32),
}
