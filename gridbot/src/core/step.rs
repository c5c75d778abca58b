//! Pure single-command step function.

use crate::core::command::Action;
use crate::core::geometry::{Direction, Position};
use crate::core::level::Level;

/// Result of applying one action to a pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEffect {
    /// Moved one cell onto a free square.
    Moved(Position),
    /// Moved onto an obstacle; the run is lost with the bot on that cell.
    HitObstacle(Position),
    /// The move would leave the board; the bot does not move. Carries the
    /// attempted cell, or the current one when the step is unrepresentable.
    OutOfBounds(Position),
    Turned(Direction),
    /// GoTo or Glide relocation. Never fails.
    Relocated(Position),
}

impl StepEffect {
    /// True if the effect ends the run as lost.
    pub fn is_failure(&self) -> bool {
        matches!(self, StepEffect::HitObstacle(_) | StepEffect::OutOfBounds(_))
    }
}

/// Compute the effect of `action` for a bot at `position` facing `direction`.
///
/// Bounds are checked before obstacles. GoTo and Glide skip both checks.
pub fn apply_action(
    level: &Level,
    position: Position,
    direction: Direction,
    action: &Action,
) -> StepEffect {
    match action {
        Action::Move => match position.step(direction) {
            None => StepEffect::OutOfBounds(position),
            Some(next) if !next.within(level.grid_size) => StepEffect::OutOfBounds(next),
            Some(next) if level.is_obstacle(next) => StepEffect::HitObstacle(next),
            Some(next) => StepEffect::Moved(next),
        },
        Action::TurnLeft => StepEffect::Turned(direction.turn_left()),
        Action::TurnRight => StepEffect::Turned(direction.turn_right()),
        Action::GoTo(target) | Action::Glide(target) => StepEffect::Relocated(*target),
    }
}
