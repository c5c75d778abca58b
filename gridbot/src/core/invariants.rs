//! Semantic invariants of a level catalog not expressible via JSON Schema.

use std::collections::HashSet;

use crate::core::goal::SPECIAL_TASK_CENTER;
use crate::core::level::Level;

/// Check catalog invariants:
/// - At least one level
/// - Ids unique and ascending (catalog order is play order)
/// - `grid_size > 0`
/// - Start, goal and obstacles inside the board
/// - Start and goal not on an obstacle
/// - Non-empty `allowed_commands` without duplicates
/// - Special-task boards contain the center checkpoint
pub fn validate_catalog(levels: &[Level]) -> Vec<String> {
    let mut errors = Vec::new();
    if levels.is_empty() {
        errors.push("catalog must contain at least one level".to_string());
        return errors;
    }

    let mut seen = HashSet::new();
    for (index, level) in levels.iter().enumerate() {
        let path = format!("levels[{}] (id {})", index, level.id);
        if !seen.insert(level.id) {
            errors.push(format!("duplicate id {} at {}", level.id, path));
        }
        validate_level(level, &path, &mut errors);
    }

    if !ids_ascending(levels) {
        errors.push("levels must be ordered by ascending id".to_string());
    }

    errors
}

fn validate_level(level: &Level, path: &str, errors: &mut Vec<String>) {
    if level.grid_size <= 0 {
        errors.push(format!("{}: grid_size must be > 0", path));
        return;
    }

    let size = level.grid_size;
    if !level.start.within(size) {
        errors.push(format!("{}: start {} outside board", path, level.start));
    }
    if !level.goal.within(size) {
        errors.push(format!("{}: goal {} outside board", path, level.goal));
    }
    for obstacle in &level.obstacles {
        if !obstacle.within(size) {
            errors.push(format!("{}: obstacle {} outside board", path, obstacle));
        }
    }
    if level.is_obstacle(level.start) {
        errors.push(format!("{}: start {} is an obstacle", path, level.start));
    }
    if level.is_obstacle(level.goal) {
        errors.push(format!("{}: goal {} is an obstacle", path, level.goal));
    }

    if level.allowed_commands.is_empty() {
        errors.push(format!("{}: allowed_commands must not be empty", path));
    }
    let mut kinds = HashSet::new();
    for kind in &level.allowed_commands {
        if !kinds.insert(*kind) {
            errors.push(format!("{}: duplicate allowed command {}", path, kind));
        }
    }

    if level.special_task && !SPECIAL_TASK_CENTER.within(size) {
        errors.push(format!(
            "{}: special task needs the center checkpoint {} on the board",
            path, SPECIAL_TASK_CENTER
        ));
    }
}

fn ids_ascending(levels: &[Level]) -> bool {
    levels.windows(2).all(|pair| pair[0].id < pair[1].id)
}
