//! Win condition evaluation.

use serde::Serialize;

use crate::core::geometry::Position;
use crate::core::level::Level;
use crate::core::types::{LossReason, Outcome};
use crate::core::visited::VisitedCells;

/// Center checkpoint of the special task. Fixed for its 5x5 board.
pub const SPECIAL_TASK_CENTER: Position = Position::new(2, 2);

/// Checkpoints of a special-task level: the four corners then the center.
pub fn checkpoints(grid_size: i32) -> [Position; 5] {
    let max = grid_size - 1;
    [
        Position::new(0, 0),
        Position::new(max, 0),
        Position::new(max, max),
        Position::new(0, max),
        SPECIAL_TASK_CENTER,
    ]
}

const CHECKPOINT_LABELS: [&str; 5] = [
    "Top-Left",
    "Top-Right",
    "Bottom-Right",
    "Bottom-Left",
    "Center",
];

/// One row of the special-task checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckpointStatus {
    pub label: &'static str,
    pub position: Position,
    pub visited: bool,
}

/// Checklist rows for a special-task level; empty for ordinary levels.
pub fn checkpoint_progress(level: &Level, visited: &VisitedCells) -> Vec<CheckpointStatus> {
    if !level.special_task {
        return Vec::new();
    }
    checkpoints(level.grid_size)
        .into_iter()
        .zip(CHECKPOINT_LABELS)
        .map(|(position, label)| CheckpointStatus {
            label,
            position,
            visited: visited.contains(position),
        })
        .collect()
}

/// Decide the outcome of a program that ran to completion.
pub fn evaluate_goal(level: &Level, final_position: Position, visited: &VisitedCells) -> Outcome {
    if level.special_task {
        let missing: Vec<Position> = checkpoints(level.grid_size)
            .into_iter()
            .filter(|cell| !visited.contains(*cell))
            .collect();
        if missing.is_empty() {
            return Outcome::Won;
        }
        return Outcome::lost(LossReason::CheckpointsMissed { missing });
    }

    if final_position == level.goal {
        Outcome::Won
    } else {
        Outcome::lost(LossReason::GoalNotReached { final_position })
    }
}
