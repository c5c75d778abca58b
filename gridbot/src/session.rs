//! Player session: current level, program and run lifecycle.
//!
//! The session is the single writer of [`RunState`] outside a run. A run's
//! driver reports back through [`Session::record_snapshot`] and
//! [`Session::finish_run`], keyed by run id so a stopped or replaced run can
//! never overwrite newer state.

use tracing::debug;

use crate::catalog::LevelCatalog;
use crate::core::command::{Action, Command, CommandId};
use crate::core::goal::{CheckpointStatus, checkpoint_progress};
use crate::core::level::Level;
use crate::core::state::RunState;
use crate::core::types::{Outcome, Phase, RunSnapshot, RunSummary};
use crate::engine::{Run, StopToken};
use crate::error::GameError;
use crate::queue::CommandQueue;

/// Identifier of one started run within a session.
pub type RunId = u64;

/// A run started by [`Session::start_run`], ready to be driven.
#[derive(Debug)]
pub struct RunHandle {
    pub id: RunId,
    pub run: Run,
}

#[derive(Debug, Clone)]
struct ActiveRun {
    id: RunId,
    stop: StopToken,
}

#[derive(Debug)]
pub struct Session {
    catalog: LevelCatalog,
    level_index: usize,
    queue: CommandQueue,
    state: RunState,
    last_outcome: Option<Outcome>,
    active: Option<ActiveRun>,
    run_counter: RunId,
}

impl Session {
    /// New session on the first level of `catalog`.
    pub fn new(catalog: LevelCatalog) -> Result<Self, GameError> {
        let level = catalog.get(0).ok_or(GameError::UnknownLevel {
            index: 0,
            count: catalog.len(),
        })?;
        let state = RunState::idle(level);
        Ok(Self {
            catalog,
            level_index: 0,
            queue: CommandQueue::new(),
            state,
            last_outcome: None,
            active: None,
            run_counter: 0,
        })
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level(&self) -> &Level {
        // `level_index` is only ever set to an index validated against the catalog.
        &self.catalog.levels()[self.level_index]
    }

    pub fn program(&self) -> &[Command] {
        self.queue.commands()
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_run(&self) -> Option<RunId> {
        self.active.as_ref().map(|active| active.id)
    }

    pub fn has_next_level(&self) -> bool {
        self.catalog.has_next(self.level_index)
    }

    /// Special-task checklist for the current visits.
    pub fn checkpoints(&self) -> Vec<CheckpointStatus> {
        checkpoint_progress(self.level(), &self.state.visited)
    }

    /// Append a command. Clears any shown result and returns the bot to start.
    pub fn append(&mut self, action: Action) -> Result<CommandId, GameError> {
        self.ensure_idle("append")?;
        let id = self.queue.append(action);
        self.idle_at_start();
        debug!(%id, %action, len = self.queue.len(), "command appended");
        Ok(id)
    }

    /// Remove the command at `index`. Clears any shown result.
    pub fn remove_at(&mut self, index: usize) -> Result<Command, GameError> {
        self.ensure_idle("remove")?;
        let len = self.queue.len();
        let removed = self.queue.remove_at(index).ok_or_else(|| {
            debug!(index, len, "remove rejected: index out of range");
            GameError::InvalidIndex { index, len }
        })?;
        self.idle_at_start();
        debug!(index, id = %removed.id, "command removed");
        Ok(removed)
    }

    /// Empty the program and reset run state.
    pub fn clear(&mut self) -> Result<(), GameError> {
        self.ensure_idle("clear")?;
        self.queue.clear();
        self.idle_at_start();
        debug!("program cleared");
        Ok(())
    }

    /// Switch level: stops any active run, clears the program.
    pub fn select_level(&mut self, index: usize) -> Result<(), GameError> {
        if self.catalog.get(index).is_none() {
            return Err(GameError::UnknownLevel {
                index,
                count: self.catalog.len(),
            });
        }
        self.cancel_active();
        self.level_index = index;
        self.queue = CommandQueue::new();
        self.idle_at_start();
        debug!(index, level = self.level().id, "level selected");
        Ok(())
    }

    pub fn next_level(&mut self) -> Result<(), GameError> {
        if !self.has_next_level() {
            return Err(GameError::NoNextLevel);
        }
        self.select_level(self.level_index + 1)
    }

    /// Begin executing the program.
    pub fn start_run(&mut self) -> Result<RunHandle, GameError> {
        self.ensure_idle("run")?;
        let stop = StopToken::new();
        let run = Run::new(
            self.level().clone(),
            self.queue.commands().to_vec(),
            stop.clone(),
        )?;
        self.run_counter += 1;
        let id = self.run_counter;
        self.active = Some(ActiveRun { id, stop });
        self.last_outcome = None;
        self.state.reset(&self.catalog.levels()[self.level_index]);
        self.state.phase = Phase::Running;
        debug!(run_id = id, commands = self.queue.len(), "run started");
        Ok(RunHandle { id, run })
    }

    /// Record a step snapshot. Returns false for a stale run.
    pub fn record_snapshot(&mut self, run_id: RunId, snapshot: &RunSnapshot) -> bool {
        if self.active_run() != Some(run_id) {
            return false;
        }
        self.state.apply_snapshot(snapshot);
        true
    }

    /// Record a run's verdict. Returns false for a stale run.
    pub fn finish_run(&mut self, run_id: RunId, summary: &RunSummary) -> bool {
        if self.active_run() != Some(run_id) {
            debug!(run_id, "ignoring finish of stale run");
            return false;
        }
        self.active = None;
        match summary.outcome {
            Outcome::Aborted => {
                self.idle_at_start();
            }
            _ => {
                self.state.apply_snapshot(&summary.snapshot);
                self.state.current_step = None;
                self.state.phase = summary.outcome.phase();
                self.last_outcome = Some(summary.outcome.clone());
            }
        }
        true
    }

    /// Request stop on the active run and return to idle at once.
    ///
    /// Returns false if nothing was running.
    pub fn stop(&mut self) -> bool {
        let stopped = self.cancel_active();
        if stopped {
            self.idle_at_start();
        }
        stopped
    }

    /// "Try again": stop anything running and idle at the start pose.
    pub fn reset(&mut self) {
        self.cancel_active();
        self.idle_at_start();
    }

    fn cancel_active(&mut self) -> bool {
        match self.active.take() {
            Some(active) => {
                active.stop.request_stop();
                debug!(run_id = active.id, "stop requested");
                true
            }
            None => false,
        }
    }

    fn ensure_idle(&self, op: &str) -> Result<(), GameError> {
        if self.is_running() {
            debug!(op, "rejected while running");
            return Err(GameError::AlreadyRunning);
        }
        Ok(())
    }

    fn idle_at_start(&mut self) {
        self.last_outcome = None;
        self.state.reset(&self.catalog.levels()[self.level_index]);
    }
}
