//! Program commands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::geometry::Position;

/// Kind of a command, without its payload.
///
/// Levels list the kinds a player may use; pauses are configured per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Move,
    TurnLeft,
    TurnRight,
    GoTo,
    Glide,
}

impl CommandKind {
    pub fn label(self) -> &'static str {
        match self {
            CommandKind::Move => "move",
            CommandKind::TurnLeft => "turn_left",
            CommandKind::TurnRight => "turn_right",
            CommandKind::GoTo => "go_to",
            CommandKind::Glide => "glide",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a command does when executed.
///
/// Serialized internally tagged: `{"kind":"move"}`, `{"kind":"go_to","x":1,"y":2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Move,
    TurnLeft,
    TurnRight,
    GoTo(Position),
    Glide(Position),
}

impl Action {
    pub fn kind(&self) -> CommandKind {
        match self {
            Action::Move => CommandKind::Move,
            Action::TurnLeft => CommandKind::TurnLeft,
            Action::TurnRight => CommandKind::TurnRight,
            Action::GoTo(_) => CommandKind::GoTo,
            Action::Glide(_) => CommandKind::Glide,
        }
    }

    /// Target cell of a GoTo or Glide.
    pub fn target(&self) -> Option<Position> {
        match self {
            Action::GoTo(target) | Action::Glide(target) => Some(*target),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::GoTo(target) => write!(f, "go_to {target}"),
            Action::Glide(target) => write!(f, "glide {target}"),
            other => f.write_str(other.kind().label()),
        }
    }
}

/// Parses the compact CLI form: `move`, `left`, `right`, `goto:X,Y`, `glide:X,Y`.
impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        let (name, args) = match token.split_once(':') {
            Some((name, args)) => (name, Some(args)),
            None => (token.as_str(), None),
        };
        match (name, args) {
            ("move" | "m", None) => Ok(Action::Move),
            ("left" | "turn_left" | "l", None) => Ok(Action::TurnLeft),
            ("right" | "turn_right" | "r", None) => Ok(Action::TurnRight),
            ("goto" | "go_to", Some(args)) => parse_target(args).map(Action::GoTo),
            ("glide", Some(args)) => parse_target(args).map(Action::Glide),
            ("goto" | "go_to" | "glide", None) => {
                Err(format!("'{name}' needs a target, e.g. {name}:2,3"))
            }
            _ => Err(format!("unknown command '{}'", s.trim())),
        }
    }
}

fn parse_target(args: &str) -> Result<Position, String> {
    let (x, y) = args
        .split_once(',')
        .ok_or_else(|| format!("target '{args}' must be X,Y"))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|err| format!("target x '{x}': {err}"))?;
    let y = y
        .trim()
        .parse::<i32>()
        .map_err(|err| format!("target y '{y}': {err}"))?;
    Ok(Position::new(x, y))
}

/// Parse a list of commands separated by whitespace or `;`.
pub fn parse_actions(list: &str) -> Result<Vec<Action>, String> {
    list.split(|c: char| c == ';' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

/// Identifier assigned when a command is appended to a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(pub u64);

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cmd-{}", self.0)
    }
}

/// A queued command: identity for UI diffing plus the action to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub id: CommandId,
    #[serde(flatten)]
    pub action: Action,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        self.action.kind()
    }
}
