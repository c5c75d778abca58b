use serde::{Deserialize, Serialize};

use crate::core::command::{Action, CommandKind};
use crate::core::geometry::{Direction, Position};

/// Immutable definition of one puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: u32,
    pub title: String,
    pub message: String,
    /// Side length of the square board.
    pub grid_size: i32,
    pub start: Position,
    pub start_direction: Direction,
    pub goal: Position,
    #[serde(default)]
    pub obstacles: Vec<Position>,
    pub allowed_commands: Vec<CommandKind>,
    /// Win by visiting the checkpoints instead of reaching `goal`.
    #[serde(default)]
    pub special_task: bool,
}

impl Level {
    pub fn is_obstacle(&self, position: Position) -> bool {
        self.obstacles.contains(&position)
    }

    pub fn allows(&self, kind: CommandKind) -> bool {
        self.allowed_commands.contains(&kind)
    }

    /// True if GoTo or Glide are permitted, i.e. the player needs target inputs.
    pub fn uses_coordinates(&self) -> bool {
        self.allows(CommandKind::GoTo) || self.allows(CommandKind::Glide)
    }

    /// Why the command palette could not author `action` on this level.
    ///
    /// The palette offers only the allowed kinds and on-board targets. The
    /// engine itself accepts any action.
    pub fn palette_rejection(&self, action: &Action) -> Option<String> {
        if !self.allows(action.kind()) {
            return Some(format!("{} is not available on {}", action.kind(), self.title));
        }
        match action.target() {
            Some(target) if !target.within(self.grid_size) => Some(format!(
                "target {} is off the {}x{} board",
                target, self.grid_size, self.grid_size
            )),
            _ => None,
        }
    }
}
