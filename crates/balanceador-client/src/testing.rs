//! Test utilities for balanceador-client
//!
//! Provides an in-process HTTP server and a scriptable stand-in for a
//! hunters backend, so clients and the gateway can be exercised over real
//! HTTP without external services.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpListener;

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub http: reqwest::Client,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Create a new test server from an axum Router
    ///
    /// # Example
    ///
    /// ```ignore
    /// use balanceador_client::testing::TestServer;
    ///
    /// let server = TestServer::start(router).await?;
    /// let body = server.http.get(server.url("/health")).send().await?;
    /// ```
    pub async fn start(router: Router) -> std::io::Result<Self> {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        Ok(Self {
            addr,
            http: reqwest::Client::new(),
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for a path on this server
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Endpoints of the `/cazadores` resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StubRoute {
    List,
    Search,
    Create,
    Update,
    Delete,
}

/// Body of a canned reply
#[derive(Debug, Clone)]
pub enum StubBody {
    Json(Value),
    /// Sent verbatim, for exercising decode failures
    Text(String),
}

/// A canned reply for one route
#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: u16,
    pub body: StubBody,
    pub delay: Option<Duration>,
}

impl StubReply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: StubBody::Json(body),
            delay: None,
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: StubBody::Text(body.into()),
            delay: None,
        }
    }

    /// Delay the reply, e.g. to trigger client timeouts
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request received by a [`StubService`]
#[derive(Debug, Clone, PartialEq)]
pub struct StubRequest {
    pub route: StubRoute,
    pub id: Option<String>,
    pub nombre: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct StubState {
    replies: Mutex<HashMap<StubRoute, StubReply>>,
    requests: Mutex<Vec<StubRequest>>,
}

/// Scriptable stand-in for a hunters backend.
///
/// Routes without a configured reply answer `404 {"error": "..."}`. Every
/// request is recorded and can be inspected with [`StubService::requests`].
#[derive(Clone, Default)]
pub struct StubService {
    state: Arc<StubState>,
}

impl StubService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the reply for a route, replacing any previous one
    pub fn on(self, route: StubRoute, reply: StubReply) -> Self {
        self.state.replies.lock().insert(route, reply);
        self
    }

    pub fn on_list(self, reply: StubReply) -> Self {
        self.on(StubRoute::List, reply)
    }

    pub fn on_search(self, reply: StubReply) -> Self {
        self.on(StubRoute::Search, reply)
    }

    pub fn on_create(self, reply: StubReply) -> Self {
        self.on(StubRoute::Create, reply)
    }

    pub fn on_update(self, reply: StubReply) -> Self {
        self.on(StubRoute::Update, reply)
    }

    pub fn on_delete(self, reply: StubReply) -> Self {
        self.on(StubRoute::Delete, reply)
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<StubRequest> {
        self.state.requests.lock().clone()
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.state.requests.lock().len()
    }

    /// Build an axum router serving the `/cazadores` resource
    pub fn router(&self) -> Router {
        Router::new()
            .route("/cazadores", get(stub_list).post(stub_create))
            .route("/cazadores/buscar", get(stub_search))
            .route("/cazadores/{id}", put(stub_update).delete(stub_delete))
            .with_state(self.clone())
    }

    async fn respond(&self, request: StubRequest) -> Response {
        let reply = self.state.replies.lock().get(&request.route).cloned();
        self.state.requests.lock().push(request);

        let Some(reply) = reply else {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "No configurado" })),
            )
                .into_response();
        };

        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }

        let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match reply.body {
            StubBody::Json(body) => (status, Json(body)).into_response(),
            StubBody::Text(body) => (status, body).into_response(),
        }
    }
}

async fn stub_list(State(stub): State<StubService>) -> Response {
    stub.respond(StubRequest {
        route: StubRoute::List,
        id: None,
        nombre: None,
        body: None,
    })
    .await
}

async fn stub_search(
    State(stub): State<StubService>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    stub.respond(StubRequest {
        route: StubRoute::Search,
        id: None,
        nombre: query.get("nombre").cloned(),
        body: None,
    })
    .await
}

async fn stub_create(State(stub): State<StubService>, Json(body): Json<Value>) -> Response {
    stub.respond(StubRequest {
        route: StubRoute::Create,
        id: None,
        nombre: None,
        body: Some(body),
    })
    .await
}

async fn stub_update(
    State(stub): State<StubService>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    stub.respond(StubRequest {
        route: StubRoute::Update,
        id: Some(id),
        nombre: None,
        body: Some(body),
    })
    .await
}

async fn stub_delete(State(stub): State<StubService>, Path(id): Path<String>) -> Response {
    stub.respond(StubRequest {
        route: StubRoute::Delete,
        id: Some(id),
        nombre: None,
        body: None,
    })
    .await
}
