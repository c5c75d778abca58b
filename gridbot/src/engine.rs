//! Execution engine: replays a program against a level one step at a time.
//!
//! A [`Run`] is a polled iterator. Each call to `next` applies exactly one
//! command and yields its snapshot; the final call yields the verdict. The
//! caller owns pacing: it asks [`Run::next_pause`] how long to wait before
//! the next step and is free to sleep, yield to an async runtime, or skip
//! the wait entirely. A [`StopToken`] is checked at every step boundary.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::command::Command;
use crate::core::goal::evaluate_goal;
use crate::core::level::Level;
use crate::core::state::RunState;
use crate::core::step::{StepEffect, apply_action};
use crate::core::types::{LossReason, Outcome, Phase, RunSnapshot, RunSummary};
use crate::error::GameError;
use crate::io::config::TimingConfig;

/// Shared cancellation flag for one run.
///
/// Setting it is idempotent; the run observes it at the next step boundary.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Item yielded by [`Run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepEvent {
    /// A command was applied and the run continues.
    Advanced(RunSnapshot),
    /// The run is over. Yielded exactly once.
    Finished(RunSummary),
}

/// One replay of a program. Owns copies of the level and commands so it can
/// outlive edits to the session that started it.
#[derive(Debug)]
pub struct Run {
    level: Level,
    commands: Vec<Command>,
    state: RunState,
    next_index: usize,
    stop: StopToken,
    finished: Option<RunSummary>,
    reported: bool,
}

impl Run {
    /// Start a run from the level's idle state.
    ///
    /// Fails with [`GameError::EmptyProgram`] when there is nothing to execute.
    pub fn new(level: Level, commands: Vec<Command>, stop: StopToken) -> Result<Self, GameError> {
        if commands.is_empty() {
            return Err(GameError::EmptyProgram);
        }
        let mut state = RunState::idle(&level);
        state.phase = Phase::Running;
        debug!(level = level.id, commands = commands.len(), "run started");
        Ok(Self {
            level,
            commands,
            state,
            next_index: 0,
            stop,
            finished: None,
            reported: false,
        })
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn stop_token(&self) -> &StopToken {
        &self.stop
    }

    pub fn summary(&self) -> Option<&RunSummary> {
        self.finished.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Index of the command the next `next()` call will apply.
    pub fn upcoming_step(&self) -> Option<usize> {
        if self.finished.is_some() || self.next_index >= self.commands.len() {
            return None;
        }
        Some(self.next_index)
    }

    /// Pause owed before the next step, or `None` when no step remains or
    /// a stop was requested.
    pub fn next_pause(&self, timing: &TimingConfig) -> Option<Duration> {
        if self.stop.is_stopped() {
            return None;
        }
        self.upcoming_step()
            .map(|index| timing.pause_for(self.commands[index].kind()))
    }

    /// Apply the next command, or finish.
    fn advance(&mut self) -> StepEvent {
        if let Some(summary) = &self.finished {
            return StepEvent::Finished(summary.clone());
        }

        if self.stop.is_stopped() {
            self.state.reset(&self.level);
            return self.finish(Outcome::Aborted);
        }

        let Some(command) = self.commands.get(self.next_index).copied() else {
            let outcome = evaluate_goal(&self.level, self.state.position, &self.state.visited);
            return self.finish(outcome);
        };

        let index = self.next_index;
        self.next_index += 1;
        self.state.current_step = Some(index);

        let effect = apply_action(
            &self.level,
            self.state.position,
            self.state.direction,
            &command.action,
        );
        debug!(step = index, command = %command.action, ?effect, "step applied");

        match effect {
            StepEffect::Moved(cell) | StepEffect::Relocated(cell) => {
                self.state.position = cell;
                self.state.visited.record(cell);
            }
            StepEffect::Turned(direction) => {
                self.state.direction = direction;
            }
            StepEffect::HitObstacle(cell) => {
                self.state.position = cell;
                return self.finish(Outcome::lost(LossReason::Obstacle { at: cell }));
            }
            StepEffect::OutOfBounds(cell) => {
                return self.finish(Outcome::lost(LossReason::OutOfBounds { attempted: cell }));
            }
        }

        if self.next_index == self.commands.len() {
            let outcome = evaluate_goal(&self.level, self.state.position, &self.state.visited);
            return self.finish(outcome);
        }

        StepEvent::Advanced(self.state.snapshot())
    }

    fn finish(&mut self, outcome: Outcome) -> StepEvent {
        self.state.phase = outcome.phase();
        let steps_executed = self.next_index;
        info!(
            level = self.level.id,
            outcome = outcome.label(),
            steps = steps_executed,
            "run finished"
        );
        let summary = RunSummary {
            outcome,
            snapshot: self.state.snapshot(),
            steps_executed,
        };
        self.finished = Some(summary.clone());
        StepEvent::Finished(summary)
    }
}

impl Iterator for Run {
    type Item = StepEvent;

    fn next(&mut self) -> Option<StepEvent> {
        if self.reported {
            return None;
        }
        let event = self.advance();
        if matches!(event, StepEvent::Finished(_)) {
            self.reported = true;
        }
        Some(event)
    }
}

/// Abstraction over the wait between steps.
pub trait Pacer {
    fn pause(&self, duration: Duration);
}

/// Blocks the calling thread for each pause.
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Skips every pause. Used for `--instant` replays and tests.
pub struct NoPause;

impl Pacer for NoPause {
    fn pause(&self, _duration: Duration) {}
}

/// Drive `run` to completion, pausing before each step and reporting every
/// event to `on_event`.
pub fn execute<P: Pacer, F: FnMut(&StepEvent)>(
    mut run: Run,
    pacer: &P,
    timing: &TimingConfig,
    mut on_event: F,
) -> RunSummary {
    loop {
        if let Some(pause) = run.next_pause(timing) {
            pacer.pause(pause);
        }
        let event = run.advance();
        on_event(&event);
        if let StepEvent::Finished(summary) = event {
            return summary;
        }
    }
}
