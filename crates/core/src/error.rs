//! Error types for timer lookups and session wiring

use thiserror::Error;

/// Errors from the timer registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("no timer registered under {name:?}")]
    NotFound { name: String },
}

/// Errors surfaced while driving a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Timer(#[from] TimerError),

    #[error("column {index} does not exist (expected 1..={count})")]
    NoSuchColumn { index: u8, count: u8 },
}
