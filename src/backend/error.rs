//! Backend error types

use thiserror::Error;

/// Errors that can occur when calling the ingest/generate backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,
}

impl BackendError {
    /// Map a transport error onto the matching variant
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else if err.is_connect() {
            BackendError::Unavailable
        } else {
            BackendError::Request(err)
        }
    }

    /// HTTP status when the backend answered with a non-success response
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for backend calls
pub type BackendResult<T> = Result<T, BackendError>;
