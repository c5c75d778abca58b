//! Async run driver.
//!
//! Paces a run with `tokio::time::sleep` and reports each step back to the
//! shared session. The session lock is held only while recording, never
//! across a pause.

use tokio::task::JoinHandle;
use tracing::{debug, info};

use gridbot::engine::StepEvent;
use gridbot::session::RunHandle;

use crate::state::{AppState, StageEvent};

pub fn spawn_run(state: AppState, handle: RunHandle) -> JoinHandle<()> {
    tokio::spawn(drive(state, handle))
}

pub async fn drive(state: AppState, handle: RunHandle) {
    let RunHandle { id, mut run } = handle;
    info!(run_id = id, level = run.level().id, "run driver started");

    loop {
        if let Some(pause) = run.next_pause(&state.timing) {
            tokio::time::sleep(pause).await;
        }
        let Some(event) = run.next() else {
            break;
        };

        let mut session = state.session.lock().await;
        match event {
            StepEvent::Advanced(snapshot) => {
                if session.record_snapshot(id, &snapshot) {
                    drop(session);
                    state.publish(StageEvent::Step {
                        run_id: id,
                        snapshot,
                    });
                } else {
                    debug!(run_id = id, "dropping snapshot of stale run");
                }
            }
            StepEvent::Finished(summary) => {
                if session.finish_run(id, &summary) {
                    drop(session);
                    info!(run_id = id, outcome = summary.outcome.label(), "run driver finished");
                    state.publish(StageEvent::Finished {
                        run_id: id,
                        summary,
                    });
                }
                break;
            }
        }
    }
}
