//! Deterministic, pure logic shared by the engine, session and CLI.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod command;
pub mod geometry;
pub mod goal;
pub mod invariants;
pub mod level;
pub mod state;
pub mod step;
pub mod types;
pub mod visited;
