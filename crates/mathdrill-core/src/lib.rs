//! mathdrill-core: Problem generation, session engine, and scoring.
//!
//! This crate defines the data model, the quiz session state machine, and
//! the aggregation that the rest of mathdrill builds on.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod history;
pub mod model;
pub mod quiz;
pub mod session;
pub mod statistics;
