//! Error types for timer configuration and lookup

use thiserror::Error;

use crate::engine::TimerId;

/// Errors raised at the boundary between collaborators and timer engines.
///
/// Engine operations themselves never fail; these only come from
/// validating configuration or resolving a timer id.
#[derive(Debug, Error)]
pub enum TimerError {
    #[error("invalid timer configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("timer {id} not found")]
    NotFound { id: TimerId },

    #[error("invalid timer spec {spec:?}: {reason}")]
    InvalidSpec { spec: String, reason: String },
}

impl TimerError {
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub fn invalid_spec(spec: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }
}
