//! Grid-bot programming game engine.
//!
//! A player builds a short program of movement commands; the engine replays
//! it step by step on a square grid and decides whether the bot reaches the
//! goal. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (geometry, step function, goal
//!   evaluation, catalog invariants). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, catalog and program files).
//!
//! [`engine`] replays a program as a pollable, stoppable [`engine::Run`];
//! [`session`] ties the [`catalog`], the [`queue`] and the engine together
//! with the editing and run-lifecycle rules.

pub mod catalog;
pub mod core;
pub mod engine;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod queue;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
