//! balanceador-core - Core traits and types for the hunters gateway
//!
//! This crate provides the fundamental abstractions shared by the backend
//! clients, the fan-out gateway and the HTTP API: the [`HunterBackend`]
//! trait, the [`Record`] model with its [`Identity`], and the tagged
//! [`BackendOutcome`] that carries one backend's result as a value.

pub mod backend;
pub mod error;
pub mod models;

pub use backend::{dispatch, HunterBackend};
pub use error::{BackendError, BackendResult};
pub use models::*;
