//! Server-Sent Events stream of stage events.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use tokio::sync::broadcast;
use tracing::warn;

use crate::state::{AppState, StageEvent};

/// SSE event name for a stage event.
fn event_name(event: &StageEvent) -> &'static str {
    match event {
        StageEvent::Changed => "changed",
        StageEvent::Step { .. } => "step",
        StageEvent::Finished { .. } => "finished",
    }
}

fn to_sse(event: &StageEvent) -> Option<Event> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Event::default().event(event_name(event)).data(json)),
        Err(err) => {
            warn!(error = %err, "failed to serialize stage event");
            None
        }
    }
}

/// GET /events
pub async fn events_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.event_tx.subscribe();

    let stream = async_stream::stream! {
        yield Ok(Event::default().event("connected").data("{}"));

        loop {
            match rx.recv().await {
                Ok(stage_event) => {
                    if let Some(event) = to_sse(&stage_event) {
                        yield Ok(event);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    // Clients recover by refetching the full state.
                    warn!(skipped = n, "SSE client lagged, some events dropped");
                    if let Some(event) = to_sse(&StageEvent::Changed) {
                        yield Ok(event);
                    }
                }
                Err(broadcast::error::RecvError::Closed) => {
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)).text("ping"))
}

#[cfg(test)]
mod tests {
    use gridbot::core::geometry::{Direction, Position};
    use gridbot::core::types::{LossReason, Outcome, RunSnapshot, RunSummary};
    use serde_json::{Value, json};

    use super::*;

    fn snapshot() -> RunSnapshot {
        RunSnapshot {
            position: Position::new(1, 2),
            direction: Direction::East,
            visited: vec![Position::new(1, 2)],
            current_step: Some(0),
        }
    }

    #[test]
    fn step_payload_carries_the_snapshot() {
        let event = StageEvent::Step {
            run_id: 3,
            snapshot: snapshot(),
        };
        assert_eq!(event_name(&event), "step");
        let value: Value = serde_json::to_value(&event).expect("serialize");
        assert_eq!(value["type"], "step");
        assert_eq!(value["run_id"], 3);
        assert_eq!(value["snapshot"]["direction"], "E");
        assert_eq!(value["snapshot"]["current_step"], 0);
    }

    #[test]
    fn finished_payload_flattens_the_outcome() {
        let event = StageEvent::Finished {
            run_id: 1,
            summary: RunSummary {
                outcome: Outcome::lost(LossReason::OutOfBounds {
                    attempted: Position::new(5, 2),
                }),
                snapshot: snapshot(),
                steps_executed: 2,
            },
        };
        assert_eq!(event_name(&event), "finished");
        let value: Value = serde_json::to_value(&event).expect("serialize");
        assert_eq!(value["summary"]["outcome"], "lost");
        assert_eq!(
            value["summary"]["reason"],
            json!({ "kind": "out_of_bounds", "attempted": { "x": 5, "y": 2 } })
        );
        assert_eq!(value["summary"]["steps_executed"], 2);
    }

    #[test]
    fn changed_payload_is_bare() {
        let value = serde_json::to_value(StageEvent::Changed).expect("serialize");
        assert_eq!(value, json!({ "type": "changed" }));
    }
}
