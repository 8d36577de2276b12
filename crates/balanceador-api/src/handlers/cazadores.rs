//! Hunters handlers: merged reads and fanned-out writes

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use balanceador_gateway::{MergedList, Record, SearchResult, WriteEcho, WriteKind, WriteSummary};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub nombre: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Found {
        found: bool,
        total: usize,
        cazadores: Vec<Record>,
    },
    NotFound {
        found: bool,
        message: String,
    },
}

#[derive(Serialize)]
pub struct WriteResponse {
    pub message: String,
    pub resultados: Vec<WriteEcho>,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub eliminados: Vec<WriteEcho>,
}

/// GET /balanceador/cazadores
/// List hunters from every backend, merged by identity
pub async fn list_cazadores(State(state): State<AppState>) -> Result<Json<MergedList>, ApiError> {
    let merged = state.gateway().list().await?;
    Ok(Json(merged))
}

/// GET /balanceador/cazadores/buscar?nombre=<name>
/// Search hunters by name in every backend
pub async fn search_cazadores(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let nombre = query
        .nombre
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Debes proporcionar un nombre".to_string()))?;

    let response = match state.gateway().find_by_name(&nombre).await? {
        SearchResult::Found(merged) => SearchResponse::Found {
            found: true,
            total: merged.total,
            cazadores: merged.cazadores,
        },
        SearchResult::NotFound => SearchResponse::NotFound {
            found: false,
            message: "Cazador no encontrado en ninguno".to_string(),
        },
    };

    Ok(Json(response))
}

/// POST /balanceador/cazadores
/// Create a hunter in every backend
pub async fn create_cazador(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<WriteResponse>), ApiError> {
    let Json(body) = body?;
    let summary = state.gateway().create(body).await?;

    Ok((
        StatusCode::CREATED,
        Json(WriteResponse {
            message: write_message(&summary),
            resultados: summary.echoes,
        }),
    ))
}

/// PUT /balanceador/cazadores/:id
/// Update a hunter in every backend
pub async fn update_cazador(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<WriteResponse>, ApiError> {
    let Json(body) = body?;
    let summary = state.gateway().update(&id, body).await?;

    Ok(Json(WriteResponse {
        message: write_message(&summary),
        resultados: summary.echoes,
    }))
}

/// DELETE /balanceador/cazadores/:id
/// Delete a hunter from every backend
pub async fn delete_cazador(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let summary = state.gateway().delete(&id).await?;

    Ok(Json(DeleteResponse {
        message: write_message(&summary),
        eliminados: summary.echoes,
    }))
}

fn write_message(summary: &WriteSummary) -> String {
    let verb = match summary.kind {
        WriteKind::Create => "creado",
        WriteKind::Update => "actualizado",
        WriteKind::Delete => "eliminado",
    };

    if summary.is_complete() {
        format!("Cazador {} en todos los servicios", verb)
    } else {
        format!(
            "Cazador {} en {} de {} servicios",
            verb,
            summary.echoes.len(),
            summary.attempted
        )
    }
}
