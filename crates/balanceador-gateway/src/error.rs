//! Gateway-level errors

use thiserror::Error;

/// Errors the gateway reports to its caller.
///
/// Individual backend failures never appear here; they are absorbed at the
/// fan-out boundary. These variants describe the request itself or the
/// unanimous failure of every backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Gateway was built without any backend
    #[error("No backends configured")]
    NoBackends,

    /// Malformed request, rejected before any fan-out
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Every backend failed for the given operation
    #[error("All backends failed for {operation}")]
    AllBackendsFailed { operation: &'static str },

    /// Update/delete target was not accepted by any backend
    #[error("Record {id} not found in any backend")]
    NotFoundInAnyBackend { id: String },
}
