//! API response structures

use axum::{http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::TimerError, state::TimerView};

/// API response structure for single-timer endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: Option<TimerView>,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: Option<TimerView>) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Response carrying a timer; status is `running` or `paused`
    pub fn timer(message: String, timer: TimerView) -> Self {
        let status = if timer.snapshot.paused { "paused" } else { "running" };
        Self::new(status.to_string(), message, Some(timer))
    }

    /// Create an error response
    pub fn error(message: String) -> Self {
        Self::new("error".to_string(), message, None)
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse>);

/// Map a registry error to its HTTP status and error body
pub fn error_response(error: TimerError) -> ApiError {
    let status = match error {
        TimerError::NotFound { .. } => StatusCode::NOT_FOUND,
        TimerError::InvalidConfiguration { .. } | TimerError::InvalidSpec { .. } => {
            StatusCode::BAD_REQUEST
        }
    };
    (status, Json(ApiResponse::error(error.to_string())))
}

/// All timers, ordered by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimersResponse {
    pub timers: Vec<TimerView>,
    pub timestamp: DateTime<Utc>,
}

impl TimersResponse {
    pub fn new(timers: Vec<TimerView>) -> Self {
        Self {
            timers,
            timestamp: Utc::now(),
        }
    }
}

/// Status response with every timer and server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timers: Vec<TimerView>,
    pub timer_count: usize,
    pub running_count: usize,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
