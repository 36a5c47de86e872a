//! API error taxonomy.
//!
//! One closed set of variants, produced explicitly by each layer — never
//! inferred from a caught panic or error shape. Storage failures map to
//! different statuses depending on the path that hit them: reads surface
//! them as 500, writes as 400; the two constructors below encode that split
//! once instead of per handler.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::app::catalog_service::CatalogError;
use crate::domain::catalog::validation::FieldError;
use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// 400 with the full list of per-field messages.
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    /// 404 with `{"message": "<entity> not found"}`.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Storage failure; the status is fixed by the constructing path.
    #[error("storage failure: {source}")]
    Storage {
        source: StoreError,
        status: StatusCode,
    },
    /// Anything outside the recognized set. Responds 500 with a generic
    /// message; the detail goes to the log only.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Maps a service error on a read path (storage failures become 500).
    pub fn from_read(err: CatalogError) -> Self {
        Self::from_catalog(err, StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Maps a service error on a write path (storage failures become 400).
    pub fn from_write(err: CatalogError) -> Self {
        Self::from_catalog(err, StatusCode::BAD_REQUEST)
    }

    fn from_catalog(err: CatalogError, storage_status: StatusCode) -> Self {
        match err {
            CatalogError::Validation(errors) => ApiError::Validation(errors),
            CatalogError::NotFound(entity) => ApiError::NotFound(entity),
            CatalogError::Storage(source) => ApiError::Storage {
                source,
                status: storage_status,
            },
        }
    }

    /// A rejected request body is a validation failure on the body itself.
    pub fn bad_body(detail: impl std::fmt::Display) -> Self {
        ApiError::Validation(vec![FieldError {
            field: "body".to_string(),
            message: detail.to_string(),
        }])
    }

    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation(vec![FieldError {
            field: field.into(),
            message: message.into(),
        }])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": errors })),
            )
                .into_response(),
            ApiError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": format!("{} not found", entity) })),
            )
                .into_response(),
            ApiError::Storage { source, status } => {
                tracing::error!(error = %source, "storage failure");
                (status, Json(json!({ "message": source.to_string() }))).into_response()
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Something went wrong!" })),
                )
                    .into_response()
            }
        }
    }
}
