//! Caller-contract violations.
//!
//! Gameplay results are never errors; see [`crate::core::types::Outcome`].
//! Every variant leaves session state untouched, so ignoring one is a no-op.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("a run is already in progress")]
    AlreadyRunning,

    #[error("program is empty")]
    EmptyProgram,

    #[error("command index {index} out of range (program has {len} commands)")]
    InvalidIndex { index: usize, len: usize },

    #[error("level index {index} out of range (catalog has {count} levels)")]
    UnknownLevel { index: usize, count: usize },

    #[error("already at the last level")]
    NoNextLevel,
}
