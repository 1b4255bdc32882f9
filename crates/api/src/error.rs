//! API Error Types

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::ValidationError;
use serde_json::json;
use storage::StorageError;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed owner identity
    #[error("Authentication required")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Validation failed")]
    Validation(Vec<ValidationError>),

    /// Request body that is not the expected JSON
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(resource) => ApiError::NotFound(resource),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<Vec<ValidationError>> for ApiError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": self.to_string() }),
            ),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, json!({ "message": self.to_string() })),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, json!({ "message": self.to_string() })),
            ApiError::Validation(errors) => {
                let errors: Vec<_> = errors
                    .iter()
                    .map(|e| json!({ "field": e.field(), "message": e.to_string() }))
                    .collect();
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "message": "Validation Failed", "errors": errors }),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error" }),
                )
            }
        };

        metrics::counter!("http_errors_total", "status" => status.as_u16().to_string()).increment(1);
        (status, Json(body)).into_response()
    }
}
