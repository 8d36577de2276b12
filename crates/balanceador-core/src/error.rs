//! Common error types for hunter backends

use thiserror::Error;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors that can occur while talking to one backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// Transport/communication error (connection refused, reset, DNS, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Timeout waiting for response
    #[error("Request timed out")]
    Timeout,

    /// Backend answered with a non-2xx status
    #[error("Backend returned {status}: {message}")]
    Status {
        /// HTTP status code returned by the backend
        status: u16,
        /// Error message extracted from the body, or the status line
        message: String,
    },

    /// Response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Invalid parameter or request, rejected before any network call
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl BackendError {
    /// Create a status error from status code and message
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Whether the backend reported that the addressed record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::Status { status: 404, .. })
    }

    /// Short classification label, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::Transport(_) => "transport",
            BackendError::Timeout => "timeout",
            BackendError::Status { .. } => "status",
            BackendError::Decode(_) => "decode",
            BackendError::InvalidRequest(_) => "invalid_request",
        }
    }
}
