use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::app::catalog_service::CatalogService;
use crate::domain::catalog::validation::FieldError;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    /// Destination for poster uploads, also served under `/uploads`.
    pub upload_dir: PathBuf,
}

/// Plain confirmation body (`{"message": ...}`), used by deletes and errors.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

/// Body of a successful poster upload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    /// Public path of the stored file, directly usable as a `poster` value.
    pub file_path: String,
}

/// Body of a validation failure: every failing field is reported.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

/// Health probe body.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
