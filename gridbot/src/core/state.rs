//! Mutable per-run bot state.

use crate::core::geometry::{Direction, Position};
use crate::core::level::Level;
use crate::core::types::{Phase, RunSnapshot};
use crate::core::visited::VisitedCells;

/// Bot pose, phase and visit log for the current level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub position: Position,
    pub direction: Direction,
    pub phase: Phase,
    pub current_step: Option<usize>,
    pub visited: VisitedCells,
}

impl RunState {
    /// Idle state at the level's start pose with nothing visited.
    pub fn idle(level: &Level) -> Self {
        Self {
            position: level.start,
            direction: level.start_direction,
            phase: Phase::Idle,
            current_step: None,
            visited: VisitedCells::new(),
        }
    }

    /// Return to the idle state for `level` in place.
    pub fn reset(&mut self, level: &Level) {
        *self = Self::idle(level);
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            position: self.position,
            direction: self.direction,
            visited: self.visited.ordered().to_vec(),
            current_step: self.current_step,
        }
    }

    /// Overwrite pose and visits from a snapshot, keeping the phase.
    pub fn apply_snapshot(&mut self, snapshot: &RunSnapshot) {
        self.position = snapshot.position;
        self.direction = snapshot.direction;
        self.current_step = snapshot.current_step;
        self.visited.clear();
        for cell in &snapshot.visited {
            self.visited.record(*cell);
        }
    }
}
