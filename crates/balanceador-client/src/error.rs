//! Error types for constructing hunters clients

use balanceador_core::BackendError;
use thiserror::Error;

/// Result type alias for client construction
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while building a client
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// URL parses but cannot carry a resource path (e.g. `mailto:`)
    #[error("URL cannot be used as a base: {0}")]
    UnsupportedUrl(String),

    /// Empty backend name
    #[error("Backend name must not be empty")]
    EmptyName,
}

/// Classify a transport-level reqwest failure.
///
/// Timeouts are kept apart from other transport errors so they can be
/// logged and reported distinctly.
pub(crate) fn classify(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout
    } else if err.is_decode() {
        BackendError::Decode(err.to_string())
    } else {
        BackendError::Transport(err.to_string())
    }
}
