//! Gateway - fans every operation out to all configured backends
//!
//! The gateway owns an ordered list of backends. Each operation is sent to
//! all of them concurrently and the gateway waits until every call has
//! settled. The configured order is kept in the collected reports and is
//! what makes the merge tie-break deterministic.

use std::sync::Arc;
use std::time::Duration;

use balanceador_core::{
    dispatch, BackendError, BackendOutcome, BackendReport, HunterBackend, Operation,
};
use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::GatewayError;
use crate::merge::merge;
use crate::normalize::{normalize_list, normalize_search};
use crate::result::{MergedList, SearchResult, WriteEcho, WriteKind, WriteSummary};

/// Gateway over several hunters backends
///
/// This type:
/// - Dispatches the same operation to every backend concurrently
/// - Absorbs individual backend failures
/// - Merges read results and collects write echoes
pub struct Gateway {
    /// Backends in configured (fan-out and tie-break) order
    backends: Vec<Arc<dyn HunterBackend>>,
    /// Optional deadline applied to each backend call
    call_timeout: Option<Duration>,
}

impl Gateway {
    /// Create a gateway over the given backends, in priority order
    /// (later backends win merge ties).
    pub fn new(backends: Vec<Arc<dyn HunterBackend>>) -> Result<Self, GatewayError> {
        if backends.is_empty() {
            return Err(GatewayError::NoBackends);
        }

        for backend in &backends {
            info!(backend = %backend.name(), url = %backend.base_url(), "Registering backend with gateway");
        }

        Ok(Self {
            backends,
            call_timeout: None,
        })
    }

    /// Bound every backend call by `timeout`, on top of the client's own
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// Configured backends, in fan-out order
    pub fn backends(&self) -> &[Arc<dyn HunterBackend>] {
        &self.backends
    }

    /// Run `operation` on every backend and wait for all of them.
    ///
    /// Returns one report per backend, in configured order. Never fails:
    /// errors are recorded as [`BackendOutcome::Failure`].
    pub async fn fan_out(&self, operation: &Operation) -> Vec<BackendReport> {
        let calls = self
            .backends
            .iter()
            .map(|backend| self.call(backend.as_ref(), operation));

        let reports = join_all(calls).await;

        let succeeded = reports.iter().filter(|r| r.outcome.is_success()).count();
        debug!(
            operation = operation.name(),
            succeeded,
            total = reports.len(),
            "Fan-out settled"
        );

        reports
    }

    async fn call(&self, backend: &dyn HunterBackend, operation: &Operation) -> BackendReport {
        let outcome = match self.call_timeout {
            Some(limit) => tokio::time::timeout(limit, dispatch(backend, operation))
                .await
                .unwrap_or(BackendOutcome::Failure(BackendError::Timeout)),
            None => dispatch(backend, operation).await,
        };

        if let BackendOutcome::Failure(err) = &outcome {
            warn!(
                backend = %backend.name(),
                operation = operation.name(),
                kind = err.kind(),
                error = %err,
                "Backend call failed"
            );
        }

        BackendReport::new(backend.name(), outcome)
    }

    /// List all hunters, merged and deduplicated across backends.
    ///
    /// Fails only when every backend failed.
    pub async fn list(&self) -> Result<MergedList, GatewayError> {
        let reports = self.fan_out(&Operation::List).await;

        if reports.iter().all(|r| !r.outcome.is_success()) {
            return Err(GatewayError::AllBackendsFailed { operation: "list" });
        }

        let merged = merge(
            reports
                .iter()
                .filter_map(|r| r.outcome.payload())
                .map(normalize_list),
        );

        Ok(MergedList::new(merged))
    }

    /// Search hunters by name across backends.
    ///
    /// An empty name is rejected before any backend is called. When no
    /// backend matched, or every backend failed, the result is
    /// [`SearchResult::NotFound`].
    pub async fn find_by_name(&self, name: &str) -> Result<SearchResult, GatewayError> {
        if name.trim().is_empty() {
            return Err(GatewayError::InvalidRequest(
                "search name must not be empty".to_string(),
            ));
        }

        let reports = self.fan_out(&Operation::FindByName(name.to_string())).await;

        if reports.iter().all(|r| !r.outcome.is_success()) {
            warn!(name = %name, "Every backend failed during search, reporting not found");
        }

        let merged = merge(
            reports
                .iter()
                .filter_map(|r| r.outcome.payload())
                .map(normalize_search),
        );

        if merged.is_empty() {
            Ok(SearchResult::NotFound)
        } else {
            Ok(SearchResult::Found(MergedList::new(merged)))
        }
    }

    /// Create a hunter on every backend. Succeeds if any backend accepted it.
    pub async fn create(&self, body: Value) -> Result<WriteSummary, GatewayError> {
        let reports = self.fan_out(&Operation::Create(body)).await;
        collect_writes(WriteKind::Create, reports)
            .ok_or(GatewayError::AllBackendsFailed { operation: "create" })
    }

    /// Update a hunter on every backend. Succeeds if any backend accepted it.
    pub async fn update(&self, id: &str, body: Value) -> Result<WriteSummary, GatewayError> {
        let operation = Operation::Update {
            id: id.to_string(),
            body,
        };
        let reports = self.fan_out(&operation).await;
        collect_writes(WriteKind::Update, reports).ok_or_else(|| {
            GatewayError::NotFoundInAnyBackend { id: id.to_string() }
        })
    }

    /// Delete a hunter on every backend. Succeeds if any backend accepted it.
    pub async fn delete(&self, id: &str) -> Result<WriteSummary, GatewayError> {
        let operation = Operation::Delete { id: id.to_string() };
        let reports = self.fan_out(&operation).await;
        collect_writes(WriteKind::Delete, reports).ok_or_else(|| {
            GatewayError::NotFoundInAnyBackend { id: id.to_string() }
        })
    }
}

/// Keep the successful echoes, or `None` when every backend failed.
///
/// Echoes are not deduplicated: each backend's answer is its own provenance.
fn collect_writes(kind: WriteKind, reports: Vec<BackendReport>) -> Option<WriteSummary> {
    let attempted = reports.len();
    let echoes: Vec<WriteEcho> = reports
        .into_iter()
        .filter_map(|report| match report.outcome {
            BackendOutcome::Success(payload) => Some(WriteEcho {
                servicio: report.backend,
                cazador: payload,
            }),
            BackendOutcome::Failure(_) => None,
        })
        .collect();

    if echoes.is_empty() {
        return None;
    }

    if echoes.len() < attempted {
        warn!(
            ?kind,
            accepted = echoes.len(),
            attempted,
            "Write applied to a subset of backends"
        );
    }

    Some(WriteSummary {
        kind,
        echoes,
        attempted,
    })
}
