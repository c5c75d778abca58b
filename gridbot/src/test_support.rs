//! Test-only helpers for constructing levels and programs.

use crate::catalog::builtin_levels;
use crate::core::command::{Action, Command, CommandKind};
use crate::core::geometry::{Direction, Position};
use crate::core::level::Level;
use crate::queue::CommandQueue;

/// Built-in level 1: 5x5, start (0,2) facing east, goal (4,2), no obstacles.
pub fn level_one() -> Level {
    builtin_levels().remove(0)
}

/// Built-in level 5: visit the four corners and the center.
pub fn special_task_level() -> Level {
    builtin_levels().remove(4)
}

/// Empty board of side `grid_size`, start (0,0) facing north, goal in the
/// far corner, every command allowed.
pub fn open_level(grid_size: i32) -> Level {
    Level {
        id: 1,
        title: format!("open {grid_size}x{grid_size}"),
        message: String::new(),
        grid_size,
        start: Position::new(0, 0),
        start_direction: Direction::North,
        goal: Position::new(grid_size - 1, grid_size - 1),
        obstacles: Vec::new(),
        allowed_commands: vec![
            CommandKind::Move,
            CommandKind::TurnLeft,
            CommandKind::TurnRight,
            CommandKind::GoTo,
            CommandKind::Glide,
        ],
        special_task: false,
    }
}

/// Commands with deterministic ids for `actions`.
pub fn commands(actions: &[Action]) -> Vec<Command> {
    CommandQueue::from_actions(actions.iter().copied())
        .commands()
        .to_vec()
}

/// GoTo commands for each target, in order.
pub fn go_to_all(targets: &[Position]) -> Vec<Action> {
    targets.iter().map(|target| Action::GoTo(*target)).collect()
}
