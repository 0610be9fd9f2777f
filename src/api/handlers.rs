//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{info, warn};

use crate::{
    engine::TimerId,
    error::TimerError,
    state::{AppState, TimerSpec, TimerView},
};
use super::responses::{
    error_response, ApiError, ApiResponse, HealthResponse, StatusResponse, TimersResponse,
};

/// Log the outcome of a timer action and build the response
fn respond(
    action: &str,
    result: Result<TimerView, TimerError>,
) -> Result<Json<ApiResponse>, ApiError> {
    match result {
        Ok(view) => {
            info!("{} endpoint called - timer {} now {}", action, view.snapshot.id, view.status_line());
            Ok(Json(ApiResponse::timer(
                format!("Timer {} {}", view.snapshot.id, action),
                view,
            )))
        }
        Err(e) => {
            warn!("{} failed: {}", action, e);
            Err(error_response(e))
        }
    }
}

/// Handle GET /timers - List every timer
pub async fn list_timers_handler(State(state): State<Arc<AppState>>) -> Json<TimersResponse> {
    Json(TimersResponse::new(state.timer_views()))
}

/// Handle POST /timers - Create a timer from a spec
pub async fn add_timer_handler(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<TimerSpec>,
) -> Result<(StatusCode, Json<ApiResponse>), ApiError> {
    respond("added", state.add_timer(spec)).map(|body| (StatusCode::CREATED, body))
}

/// Handle GET /timers/:id - Current view of one timer
pub async fn get_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse>, ApiError> {
    match state.timer(TimerId(id)) {
        Ok(view) => Ok(Json(ApiResponse::timer(format!("Timer {}", id), view))),
        Err(e) => Err(error_response(e)),
    }
}

/// Handle DELETE /timers/:id - Stop and remove a timer
pub async fn remove_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse>, ApiError> {
    respond("removed", state.remove_timer(TimerId(id)))
}

/// Handle POST /timers/:id/toggle - Pause or resume
pub async fn toggle_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse>, ApiError> {
    respond("toggled", state.toggle(TimerId(id)))
}

/// Handle POST /timers/:id/start - Start a paused timer
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse>, ApiError> {
    respond("started", state.start(TimerId(id)))
}

/// Handle POST /timers/:id/stop - Stop a running timer
pub async fn stop_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse>, ApiError> {
    respond("stopped", state.stop(TimerId(id)))
}

/// Handle POST /timers/:id/reset - Restore the initial value
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse>, ApiError> {
    respond("reset", state.reset(TimerId(id)))
}

/// Handle GET /status - Return every timer with server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let timers = state.timer_views();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer_count: timers.len(),
        running_count: timers.iter().filter(|view| !view.snapshot.paused).count(),
        timers,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
