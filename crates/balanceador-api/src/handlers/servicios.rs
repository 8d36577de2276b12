//! Backend discovery handler

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct ServiciosResponse {
    pub items: Vec<ServicioInfo>,
}

#[derive(Serialize)]
pub struct ServicioInfo {
    pub name: String,
    pub url: String,
}

/// GET /balanceador/servicios
/// List configured backends in fan-out order
pub async fn list_servicios(State(state): State<AppState>) -> Json<ServiciosResponse> {
    let items = state
        .gateway()
        .backends()
        .iter()
        .map(|backend| ServicioInfo {
            name: backend.name().to_string(),
            url: backend.base_url().to_string(),
        })
        .collect();

    Json(ServiciosResponse { items })
}
