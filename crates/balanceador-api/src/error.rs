//! API error types and conversions

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use balanceador_gateway::GatewayError;
use serde::Serialize;

/// API error type that converts to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 404 Not Found
    NotFound(String),
    /// 502 Bad Gateway (every backend failed)
    BadGateway(String),
    /// 500 Internal Server Error
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "bad_gateway", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        // Log errors at appropriate levels
        if status.is_server_error() {
            tracing::error!(error = error_type, %message, "API error");
        } else if status.is_client_error() {
            tracing::debug!(error = error_type, %message, "API client error");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NoBackends => ApiError::Internal("No hay servicios configurados".to_string()),
            GatewayError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            GatewayError::AllBackendsFailed { operation: "create" } => {
                ApiError::BadGateway("No se pudo crear el cazador en ningún servicio".to_string())
            }
            GatewayError::AllBackendsFailed { .. } => {
                ApiError::BadGateway("Error al obtener datos de ambos servicios".to_string())
            }
            GatewayError::NotFoundInAnyBackend { .. } => {
                ApiError::NotFound("Cazador no encontrado en ningún servicio".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Cuerpo JSON inválido: {}", rejection.body_text()))
    }
}
