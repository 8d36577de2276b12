//! Per-backend call outcomes

use serde_json::Value;

use crate::error::BackendError;

/// Result of invoking one backend for one operation.
///
/// Failures are carried as values so that one backend's error never aborts
/// the collection of the others' results.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendOutcome {
    /// Backend answered with a decoded payload
    Success(Value),
    /// Backend call failed or was abandoned
    Failure(BackendError),
}

impl BackendOutcome {
    /// Whether this outcome holds a payload
    pub fn is_success(&self) -> bool {
        matches!(self, BackendOutcome::Success(_))
    }

    /// Borrow the payload, if any
    pub fn payload(&self) -> Option<&Value> {
        match self {
            BackendOutcome::Success(payload) => Some(payload),
            BackendOutcome::Failure(_) => None,
        }
    }

    /// Borrow the failure, if any
    pub fn error(&self) -> Option<&BackendError> {
        match self {
            BackendOutcome::Success(_) => None,
            BackendOutcome::Failure(err) => Some(err),
        }
    }
}

impl From<Result<Value, BackendError>> for BackendOutcome {
    fn from(result: Result<Value, BackendError>) -> Self {
        match result {
            Ok(payload) => BackendOutcome::Success(payload),
            Err(err) => BackendOutcome::Failure(err),
        }
    }
}

/// An outcome tagged with the backend that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct BackendReport {
    /// Configured backend name
    pub backend: String,
    /// What the backend answered
    pub outcome: BackendOutcome,
}

impl BackendReport {
    pub fn new(backend: impl Into<String>, outcome: BackendOutcome) -> Self {
        Self {
            backend: backend.into(),
            outcome,
        }
    }
}
