//! Shared application state for the UI server.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, broadcast};

use gridbot::core::command::Command;
use gridbot::core::geometry::{Direction, Position};
use gridbot::core::goal::CheckpointStatus;
use gridbot::core::level::Level;
use gridbot::core::types::{Outcome, Phase, RunSnapshot, RunSummary};
use gridbot::io::config::TimingConfig;
use gridbot::session::{RunId, Session};

/// Events broadcast to SSE clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StageEvent {
    /// The program, level or idle pose changed; clients refetch `/api/state`.
    Changed,
    Step {
        run_id: RunId,
        snapshot: RunSnapshot,
    },
    Finished {
        run_id: RunId,
        summary: RunSummary,
    },
}

/// Shared state accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub timing: Arc<TimingConfig>,
    pub event_tx: Arc<broadcast::Sender<StageEvent>>,
}

impl AppState {
    pub fn new(session: Session, timing: TimingConfig) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            session: Arc::new(Mutex::new(session)),
            timing: Arc::new(timing),
            event_tx: Arc::new(event_tx),
        }
    }

    /// Send to every subscriber. Having none is not an error.
    pub fn publish(&self, event: StageEvent) {
        let _ = self.event_tx.send(event);
    }
}

/// Everything a client needs to render the board and the program panel.
#[derive(Debug, Clone, Serialize)]
pub struct StateView {
    pub level_index: usize,
    pub level: Level,
    pub has_next_level: bool,
    pub program: Vec<Command>,
    pub phase: Phase,
    pub running: bool,
    pub position: Position,
    pub direction: Direction,
    pub current_step: Option<usize>,
    pub visited: Vec<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checkpoints: Vec<CheckpointStatus>,
}

impl StateView {
    pub fn of(session: &Session) -> Self {
        let run = session.state();
        Self {
            level_index: session.level_index(),
            level: session.level().clone(),
            has_next_level: session.has_next_level(),
            program: session.program().to_vec(),
            phase: session.phase(),
            running: session.is_running(),
            position: run.position,
            direction: run.direction,
            current_step: run.current_step,
            visited: run.visited.ordered().to_vec(),
            outcome: session.last_outcome().cloned(),
            checkpoints: session.checkpoints(),
        }
    }
}
