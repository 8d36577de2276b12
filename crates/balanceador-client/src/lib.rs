//! balanceador-client - HTTP client for one hunters backend
//!
//! Provides [`CazadoresClient`], the [`HunterBackend`] implementation that
//! talks to a `/cazadores` REST service over HTTP.
//!
//! # Example
//!
//! ```rust,no_run
//! use balanceador_client::CazadoresClient;
//! use balanceador_core::HunterBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mongo = CazadoresClient::new("mongo", "http://localhost:4001")?;
//!     let hunters = mongo.list().await?;
//!     println!("{}", hunters);
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module provides an in-process [`testing::TestServer`] and a
//! scriptable [`testing::StubService`] that stands in for a real backend:
//!
//! ```rust,ignore
//! use balanceador_client::testing::{StubReply, StubService, TestServer};
//!
//! let stub = StubService::new().on_list(StubReply::json(200, json!([{"id": 1}])));
//! let server = TestServer::start(stub.router()).await?;
//! let client = CazadoresClient::new("mongo", &server.base_url())?;
//! ```
//!
//! [`HunterBackend`]: balanceador_core::HunterBackend

mod client;
mod error;
pub mod testing;

pub use client::CazadoresClient;
pub use error::{ClientError, Result};

// Re-export core types for convenience
pub use balanceador_core::{BackendError, BackendResult, HunterBackend};
