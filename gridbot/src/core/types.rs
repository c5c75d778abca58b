//! Shared deterministic types for run results.
//!
//! These types define stable contracts between the engine, the session and
//! the UI. They serialize with stable tags so clients can match on them.

use serde::{Deserialize, Serialize};

use crate::core::geometry::{Direction, Position};

/// Coarse session phase shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Won,
    Lost,
}

/// Why a run was lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LossReason {
    /// A move would have left the board. The bot stays on its last cell.
    OutOfBounds { attempted: Position },
    /// A move entered an obstacle. The bot is shown on the obstacle.
    Obstacle { at: Position },
    /// The program finished away from the goal.
    GoalNotReached { final_position: Position },
    /// The program finished without visiting every checkpoint.
    CheckpointsMissed { missing: Vec<Position> },
}

/// Terminal verdict of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Won,
    Lost { reason: LossReason },
    /// Stopped by the player; no verdict is shown.
    Aborted,
}

impl Outcome {
    pub fn lost(reason: LossReason) -> Self {
        Outcome::Lost { reason }
    }

    pub fn is_won(&self) -> bool {
        matches!(self, Outcome::Won)
    }

    /// Phase the session settles in after this outcome.
    pub fn phase(&self) -> Phase {
        match self {
            Outcome::Won => Phase::Won,
            Outcome::Lost { .. } => Phase::Lost,
            Outcome::Aborted => Phase::Idle,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Won => "won",
            Outcome::Lost { .. } => "lost",
            Outcome::Aborted => "aborted",
        }
    }
}

/// Observable bot state after a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub position: Position,
    pub direction: Direction,
    /// Visited cells in first-visit order.
    pub visited: Vec<Position>,
    /// Index of the command that produced this snapshot.
    pub current_step: Option<usize>,
}

/// Final record of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(flatten)]
    pub outcome: Outcome,
    pub snapshot: RunSnapshot,
    /// Commands whose effect was applied (including a failing move).
    pub steps_executed: usize,
}
