//! Stable exit codes for gridbot CLI commands.

/// Command succeeded, or the replayed program won.
pub const OK: i32 = 0;
/// Invalid arguments, config, catalog or program file, or other errors.
pub const INVALID: i32 = 1;
/// `gridbot run` finished and the program lost.
pub const LOST: i32 = 2;
/// `gridbot run` was stopped before finishing.
pub const ABORTED: i32 = 3;
