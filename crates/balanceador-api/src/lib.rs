//! balanceador-api - REST API layer for the hunters gateway
//!
//! This crate exposes the [`Gateway`](balanceador_gateway::Gateway) over
//! HTTP under a fixed path prefix.
//!
//! # Usage
//!
//! ```ignore
//! use balanceador_api::{create_router, AppState, DEFAULT_PREFIX};
//!
//! let gateway = Gateway::new(backends)?;
//! let router = create_router(AppState::new(gateway), DEFAULT_PREFIX);
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Path prefix the hunters routes are mounted under
pub const DEFAULT_PREFIX: &str = "/balanceador";

/// Create the REST API router with the given application state.
///
/// Hunters routes are nested under `prefix`; an empty prefix or `/` mounts
/// them at the root. `/health` always lives at the root.
pub fn create_router(state: AppState, prefix: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/cazadores",
            get(handlers::cazadores::list_cazadores).post(handlers::cazadores::create_cazador),
        )
        .route(
            "/cazadores/buscar",
            get(handlers::cazadores::search_cazadores),
        )
        .route(
            "/cazadores/{id}",
            put(handlers::cazadores::update_cazador).delete(handlers::cazadores::delete_cazador),
        )
        // Configured backends
        .route("/servicios", get(handlers::servicios::list_servicios));

    let prefix = prefix.trim_end_matches('/');
    let router = Router::new().route("/health", get(|| async { "OK" }));
    let router = if prefix.is_empty() {
        router.merge(api)
    } else {
        router.nest(prefix, api)
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
