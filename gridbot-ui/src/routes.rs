//! HTTP route handlers for the game API.
//!
//! Every mutating route returns the resulting [`StateView`] and broadcasts a
//! change so other clients refresh.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{delete, get, post, put};
use serde_json::json;
use tracing::debug;

use gridbot::core::command::Action;
use gridbot::core::level::Level;
use gridbot::error::GameError;
use gridbot::session::Session;

use crate::driver::spawn_run;
use crate::state::{AppState, StageEvent, StateView};

/// Build the API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/levels", get(list_levels))
        .route("/state", get(get_state))
        .route("/level/{index}", put(select_level))
        .route("/level/next", post(next_level))
        .route("/program", post(append_command).delete(clear_program))
        .route("/program/{index}", delete(remove_command))
        .route("/run", post(start_run))
        .route("/stop", post(stop_run))
        .route("/reset", post(reset))
}

/// Error body: `{"error": "..."}` with a status derived from the cause.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        let status = match err {
            GameError::AlreadyRunning | GameError::EmptyProgram | GameError::NoNextLevel => {
                StatusCode::CONFLICT
            }
            GameError::InvalidIndex { .. } | GameError::UnknownLevel { .. } => {
                StatusCode::NOT_FOUND
            }
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

async fn health() -> &'static str {
    "ok"
}

/// GET /api/levels - catalog in play order.
async fn list_levels(State(state): State<AppState>) -> Json<Vec<Level>> {
    let session = state.session.lock().await;
    Json(session.catalog().levels().to_vec())
}

/// GET /api/state
async fn get_state(State(state): State<AppState>) -> Json<StateView> {
    let session = state.session.lock().await;
    Json(StateView::of(&session))
}

async fn select_level(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> ApiResult<Json<StateView>> {
    mutate(&state, |session| session.select_level(index)).await
}

async fn next_level(State(state): State<AppState>) -> ApiResult<Json<StateView>> {
    mutate(&state, Session::next_level).await
}

/// POST /api/program - append one command. Only what the level's palette
/// offers is accepted here (allowed kinds, on-board targets); the session
/// itself takes any action.
async fn append_command(
    State(state): State<AppState>,
    Json(action): Json<Action>,
) -> ApiResult<Json<StateView>> {
    mutate(&state, |session| {
        if let Some(reason) = session.level().palette_rejection(&action) {
            debug!(%action, %reason, "command not in palette");
            return Err(ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, reason));
        }
        session.append(action)?;
        Ok(())
    })
    .await
}

async fn clear_program(State(state): State<AppState>) -> ApiResult<Json<StateView>> {
    mutate(&state, Session::clear).await
}

async fn remove_command(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> ApiResult<Json<StateView>> {
    mutate(&state, |session| session.remove_at(index).map(|_| ())).await
}

/// POST /api/run - start the program and return at once; progress arrives
/// over `/events`.
async fn start_run(State(state): State<AppState>) -> ApiResult<(StatusCode, Json<StateView>)> {
    let (handle, view) = {
        let mut session = state.session.lock().await;
        let handle = session.start_run()?;
        (handle, StateView::of(&session))
    };
    state.publish(StageEvent::Changed);
    spawn_run(state.clone(), handle);
    Ok((StatusCode::ACCEPTED, Json(view)))
}

/// POST /api/stop - idempotent.
async fn stop_run(State(state): State<AppState>) -> Json<StateView> {
    let (stopped, view) = {
        let mut session = state.session.lock().await;
        let stopped = session.stop();
        (stopped, StateView::of(&session))
    };
    if stopped {
        state.publish(StageEvent::Changed);
    }
    Json(view)
}

async fn reset(State(state): State<AppState>) -> Json<StateView> {
    let view = {
        let mut session = state.session.lock().await;
        session.reset();
        StateView::of(&session)
    };
    state.publish(StageEvent::Changed);
    Json(view)
}

/// Apply `op` under the session lock, then broadcast the change.
async fn mutate<E, F>(state: &AppState, op: F) -> ApiResult<Json<StateView>>
where
    E: Into<ApiError>,
    F: FnOnce(&mut Session) -> Result<(), E>,
{
    let view = {
        let mut session = state.session.lock().await;
        op(&mut session).map_err(Into::into)?;
        StateView::of(&session)
    };
    state.publish(StageEvent::Changed);
    Ok(Json(view))
}
