//! Grid coordinates and facing directions.
//!
//! x grows to the right and y grows downward, so "north" decreases y.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A cell on the board (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one unit in `direction`, or `None` when it
    /// cannot be represented.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        Some(Self::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// True if the cell lies inside a square board of side `grid_size`.
    pub fn within(self, grid_size: i32) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Facing of the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
}

/// Order visited by repeated left turns.
const LEFT_CYCLE: [Direction; 4] = [
    Direction::North,
    Direction::West,
    Direction::South,
    Direction::East,
];

/// Order visited by repeated right turns.
const RIGHT_CYCLE: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    pub const ALL: [Direction; 4] = RIGHT_CYCLE;

    pub fn turn_left(self) -> Self {
        next_in(&LEFT_CYCLE, self)
    }

    pub fn turn_right(self) -> Self {
        next_in(&RIGHT_CYCLE, self)
    }

    /// Unit offset `(dx, dy)` of one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }
}

fn next_in(cycle: &[Direction; 4], current: Direction) -> Direction {
    let idx = cycle
        .iter()
        .position(|d| *d == current)
        .unwrap_or_default();
    cycle[(idx + 1) % cycle.len()]
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Direction::North),
            "e" | "east" => Ok(Direction::East),
            "s" | "south" => Ok(Direction::South),
            "w" | "west" => Ok(Direction::West),
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_and_right_turns_are_inverses() {
        for d in Direction::ALL {
            assert_eq!(d.turn_right().turn_left(), d);
            assert_eq!(d.turn_left().turn_right(), d);
        }
    }

    #[test]
    fn four_left_turns_return_to_start() {
        for d in Direction::ALL {
            let turned = d.turn_left().turn_left().turn_left().turn_left();
            assert_eq!(turned, d);
        }
    }

    #[test]
    fn left_turns_cycle_north_west_south_east() {
        assert_eq!(Direction::North.turn_left(), Direction::West);
        assert_eq!(Direction::West.turn_left(), Direction::South);
        assert_eq!(Direction::South.turn_left(), Direction::East);
        assert_eq!(Direction::East.turn_left(), Direction::North);
    }

    #[test]
    fn north_decreases_y() {
        let p = Position::new(2, 2);
        assert_eq!(p.step(Direction::North), Some(Position::new(2, 1)));
        assert_eq!(p.step(Direction::South), Some(Position::new(2, 3)));
        assert_eq!(p.step(Direction::East), Some(Position::new(3, 2)));
        assert_eq!(p.step(Direction::West), Some(Position::new(1, 2)));
    }

    #[test]
    fn step_past_i32_range_is_none() {
        assert_eq!(Position::new(i32::MAX, 0).step(Direction::East), None);
        assert_eq!(Position::new(i32::MIN, 0).step(Direction::West), None);
        assert_eq!(Position::new(0, i32::MIN).step(Direction::North), None);
        assert_eq!(Position::new(0, i32::MAX).step(Direction::South), None);
    }

    #[test]
    fn within_rejects_edges_outside_board() {
        assert!(Position::new(0, 0).within(5));
        assert!(Position::new(4, 4).within(5));
        assert!(!Position::new(5, 0).within(5));
        assert!(!Position::new(0, -1).within(5));
    }

    #[test]
    fn direction_serializes_as_letter() {
        let json = serde_json::to_string(&Direction::East).expect("serialize");
        assert_eq!(json, "\"E\"");
        assert_eq!("west".parse::<Direction>(), Ok(Direction::West));
    }
}
