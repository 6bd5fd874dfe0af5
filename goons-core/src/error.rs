//! Error taxonomy for the rotation core.
//!
//! Only [`QueryDataError`] ever leaves the core towards a player; the other
//! kinds are degraded to defaults by the component that can recover.

use thiserror::Error;

/// Configuration could not be read; callers fall back to defaults.
#[derive(Debug, Error)]
pub enum ConfigReadError {
    #[error("config source unavailable: {0}")]
    Source(String),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Persisted rotation record could not be read or written.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("no rotation record has been written yet")]
    Missing,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Status for the chat query could not be computed.
#[derive(Debug, Error)]
pub enum QueryDataError {
    #[error("no rotation data available")]
    NoData,
    #[error("rotation data is invalid: {0}")]
    InvalidRecord(String),
}

impl From<StateError> for QueryDataError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::Missing => Self::NoData,
            other => Self::InvalidRecord(other.to_string()),
        }
    }
}
