//! Hunters HTTP client implementation

use std::time::Duration;

use async_trait::async_trait;
use balanceador_core::{BackendError, BackendResult, HunterBackend};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{classify, ClientError, Result};

/// Resource root exposed by every hunters backend
const RESOURCE: &str = "cazadores";
/// Search sub-resource
const SEARCH: &str = "buscar";
/// Query parameter carrying the searched name
const SEARCH_PARAM: &str = "nombre";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Error body as sent by the hunters services
#[derive(Deserialize)]
struct UpstreamError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for one hunters backend
///
/// Every call is a single request: no retries, no rollback. Non-2xx answers,
/// transport failures and undecodable bodies all come back as
/// [`BackendError`] values.
#[derive(Debug, Clone)]
pub struct CazadoresClient {
    name: String,
    client: Client,
    base_url: Url,
    display_url: String,
}

impl CazadoresClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `name` - Backend name used in logs and provenance (e.g. "mongo")
    /// * `base_url` - Base URL of the service (e.g. "http://localhost:4001")
    pub fn new(name: &str, base_url: &str) -> Result<Self> {
        Self::with_config(name, base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new client with custom timeouts
    pub fn with_config(
        name: &str,
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(ClientError::EmptyName);
        }

        let parsed = Url::parse(base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::UnsupportedUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            name: name.to_string(),
            client,
            base_url: parsed,
            display_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the parsed base URL
    pub fn url(&self) -> &Url {
        &self.base_url
    }

    /// Build `<base>/cazadores[/<segment>]`, percent-encoding the segment
    fn resource_url(&self, segment: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(RESOURCE);
            if let Some(segment) = segment {
                segments.push(segment);
            }
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> BackendResult<Value> {
        let response = request.send().await.map_err(classify)?;
        self.handle_response(response).await
    }

    /// Decode a successful response or extract the upstream error
    async fn handle_response(&self, response: reqwest::Response) -> BackendResult<Value> {
        let status = response.status();

        if !status.is_success() {
            return Err(self.extract_error(response, status).await);
        }

        let body = response.bytes().await.map_err(classify)?;
        if body.iter().all(u8::is_ascii_whitespace) {
            debug!(backend = %self.name, %status, "Empty response body");
            return Ok(Value::Null);
        }

        serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn extract_error(&self, response: reqwest::Response, status: StatusCode) -> BackendError {
        let message = match response.json::<UpstreamError>().await {
            Ok(UpstreamError {
                error: Some(error), ..
            }) => error,
            Ok(UpstreamError {
                message: Some(message),
                ..
            }) => message,
            _ => format!("HTTP {}", status),
        };

        BackendError::status(status.as_u16(), message)
    }
}

#[async_trait]
impl HunterBackend for CazadoresClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn base_url(&self) -> &str {
        &self.display_url
    }

    #[instrument(skip(self), fields(backend = %self.name))]
    async fn list(&self) -> BackendResult<Value> {
        let url = self.resource_url(None);
        debug!("Listing hunters from {}", url);

        self.send(self.client.get(url)).await
    }

    #[instrument(skip(self), fields(backend = %self.name))]
    async fn find_by_name(&self, name: &str) -> BackendResult<Value> {
        if name.trim().is_empty() {
            return Err(BackendError::InvalidRequest(
                "search name must not be empty".to_string(),
            ));
        }

        let url = self.resource_url(Some(SEARCH));
        self.send(self.client.get(url).query(&[(SEARCH_PARAM, name)]))
            .await
    }

    #[instrument(skip(self, body), fields(backend = %self.name))]
    async fn create(&self, body: &Value) -> BackendResult<Value> {
        let url = self.resource_url(None);
        self.send(self.client.post(url).json(body)).await
    }

    #[instrument(skip(self, body), fields(backend = %self.name))]
    async fn update(&self, id: &str, body: &Value) -> BackendResult<Value> {
        let url = self.resource_url(Some(id));
        self.send(self.client.put(url).json(body)).await
    }

    #[instrument(skip(self), fields(backend = %self.name))]
    async fn delete(&self, id: &str) -> BackendResult<Value> {
        let url = self.resource_url(Some(id));
        self.send(self.client.delete(url)).await
    }
}
