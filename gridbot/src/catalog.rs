//! Level catalog: built-in levels and validated custom tables.

use anyhow::{Result, bail};

use crate::core::command::CommandKind;
use crate::core::geometry::{Direction, Position};
use crate::core::invariants::validate_catalog;
use crate::core::level::Level;

/// Ordered, immutable list of levels in play order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    /// The five levels shipped with the game.
    pub fn builtin() -> Self {
        Self {
            levels: builtin_levels(),
        }
    }

    /// Build a catalog after checking semantic invariants.
    pub fn from_levels(levels: Vec<Level>) -> Result<Self> {
        let errors = validate_catalog(&levels);
        if !errors.is_empty() {
            bail!("invariant violations:\n- {}", errors.join("\n- "));
        }
        Ok(Self { levels })
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn has_next(&self, index: usize) -> bool {
        index + 1 < self.levels.len()
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

const MOVE_AND_TURN: [CommandKind; 3] = [
    CommandKind::Move,
    CommandKind::TurnLeft,
    CommandKind::TurnRight,
];

pub fn builtin_levels() -> Vec<Level> {
    vec![
        Level {
            id: 1,
            title: "Level 1: Forward Motion".to_string(),
            message: "Help the bot reach the battery! Try moving forward.".to_string(),
            grid_size: 5,
            start: Position::new(0, 2),
            start_direction: Direction::East,
            goal: Position::new(4, 2),
            obstacles: Vec::new(),
            allowed_commands: MOVE_AND_TURN.to_vec(),
            special_task: false,
        },
        Level {
            id: 2,
            title: "Level 2: Turning Corners".to_string(),
            message: "You'll need to turn to reach this one!".to_string(),
            grid_size: 5,
            start: Position::new(1, 3),
            start_direction: Direction::East,
            goal: Position::new(3, 1),
            obstacles: vec![Position::new(3, 3), Position::new(1, 1)],
            allowed_commands: MOVE_AND_TURN.to_vec(),
            special_task: false,
        },
        Level {
            id: 3,
            title: "Level 3: Obstacle Course".to_string(),
            message: "Watch out for walls! Navigate the maze.".to_string(),
            grid_size: 5,
            start: Position::new(0, 4),
            start_direction: Direction::North,
            goal: Position::new(4, 0),
            obstacles: vec![
                Position::new(0, 2),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(2, 1),
                Position::new(2, 0),
                Position::new(4, 2),
            ],
            allowed_commands: MOVE_AND_TURN.to_vec(),
            special_task: false,
        },
        Level {
            id: 4,
            title: "Level 4: Advanced Coordinates".to_string(),
            message: "Use 'Go To' to jump to specific points!".to_string(),
            grid_size: 6,
            start: Position::new(0, 0),
            start_direction: Direction::East,
            goal: Position::new(5, 5),
            obstacles: Vec::new(),
            allowed_commands: vec![
                CommandKind::Move,
                CommandKind::TurnLeft,
                CommandKind::TurnRight,
                CommandKind::GoTo,
            ],
            special_task: false,
        },
        Level {
            id: 5,
            title: "Level 5: Master Task".to_string(),
            message: "Task: Visit all 4 corners and the center! Use 'Glide' to see the path."
                .to_string(),
            grid_size: 5,
            start: Position::new(2, 2),
            start_direction: Direction::North,
            goal: Position::new(2, 2),
            obstacles: Vec::new(),
            allowed_commands: vec![CommandKind::GoTo, CommandKind::Glide],
            special_task: true,
        },
    ]
}
