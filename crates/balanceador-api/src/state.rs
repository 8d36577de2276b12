//! Application state for the API

use std::sync::Arc;

use balanceador_gateway::Gateway;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<Gateway>,
}

impl AppState {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }

    /// Get the gateway
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }
}
