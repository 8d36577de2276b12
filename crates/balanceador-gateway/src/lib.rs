//! balanceador-gateway - Fan-out aggregation over hunters backends
//!
//! This crate provides the [`Gateway`] that presents several independent
//! hunters services as one logical resource.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                           Gateway                                │
//! │                                                                  │
//! │   request ──► fan_out ──► normalize ──► merge ──► single result  │
//! │                  │                                               │
//! │        ┌─────────┴─────────┐                                     │
//! │        ▼                   ▼                                     │
//! │  ┌───────────────┐  ┌───────────────┐                            │
//! │  │ HunterBackend │  │ HunterBackend │   (configured order)       │
//! │  │    (mongo)    │  │  (postgres)   │                            │
//! │  └───────────────┘  └───────────────┘                            │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every backend is called on every request and the gateway waits for all
//! of them. A failing backend is logged and left out; only when every
//! backend fails does the caller see an aggregate error.
//!
//! # Usage
//!
//! ```rust,ignore
//! use balanceador_gateway::Gateway;
//! use balanceador_client::CazadoresClient;
//!
//! let mongo = CazadoresClient::new("mongo", "http://localhost:4001")?;
//! let pg = CazadoresClient::new("postgres", "http://localhost:4002")?;
//! let gateway = Gateway::new(vec![Arc::new(mongo), Arc::new(pg)])?;
//!
//! let merged = gateway.list().await?;
//! println!("{} hunters", merged.total);
//! ```

mod error;
mod gateway;
pub mod merge;
pub mod normalize;
mod result;

pub use error::GatewayError;
pub use gateway::Gateway;
pub use result::{MergedList, SearchResult, WriteEcho, WriteKind, WriteSummary};

// Re-export core types for convenience
pub use balanceador_core::{
    BackendError, BackendOutcome, BackendReport, HunterBackend, Identity, Operation, Record,
};
