//! HunterBackend trait - the core abstraction over one hunters service

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::{BackendError, BackendResult};
use crate::models::{BackendOutcome, Operation};

/// A single hunters service exposing the `/cazadores` resource.
///
/// Implementations perform exactly one call per method, never retry and
/// never roll back. Payloads are returned as raw decoded JSON; shaping them
/// into records is the gateway's job.
#[async_trait]
pub trait HunterBackend: Send + Sync {
    /// Configured name of this backend (e.g. `"mongo"`, `"postgres"`)
    fn name(&self) -> &str;

    /// Base URL this backend is reached at, for display purposes
    fn base_url(&self) -> &str;

    /// `GET /cazadores`
    async fn list(&self) -> BackendResult<Value>;

    /// `GET /cazadores/buscar?nombre=<name>`
    async fn find_by_name(&self, name: &str) -> BackendResult<Value>;

    /// `POST /cazadores`, forwarding `body` verbatim
    async fn create(&self, body: &Value) -> BackendResult<Value>;

    /// `PUT /cazadores/:id`, forwarding `body` verbatim
    async fn update(&self, id: &str, body: &Value) -> BackendResult<Value>;

    /// `DELETE /cazadores/:id`
    async fn delete(&self, id: &str) -> BackendResult<Value>;
}

/// Run one operation against one backend and capture the result as a value.
///
/// This is the boundary where errors stop propagating: whatever happens,
/// the caller gets a [`BackendOutcome`].
pub async fn dispatch(backend: &dyn HunterBackend, operation: &Operation) -> BackendOutcome {
    let result = match operation {
        Operation::List => backend.list().await,
        Operation::FindByName(name) => {
            if name.trim().is_empty() {
                Err(BackendError::InvalidRequest(
                    "search name must not be empty".to_string(),
                ))
            } else {
                backend.find_by_name(name).await
            }
        }
        Operation::Create(body) => backend.create(body).await,
        Operation::Update { id, body } => backend.update(id, body).await,
        Operation::Delete { id } => backend.delete(id).await,
    };

    debug!(
        backend = %backend.name(),
        operation = operation.name(),
        success = result.is_ok(),
        "Backend call settled"
    );

    result.into()
}
