//! Poster image upload.
//!
//! Accepts a multipart form with a single `poster` field, restricted to
//! JPEG/PNG and capped at 5MB. The file lands in the configured upload
//! directory under a collision-free name and is served back via the static
//! `/uploads` route.

use std::path::Path as FilePath;

use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;
use rand::Rng;

use crate::infra::config::MAX_UPLOAD_BYTES;
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{AppState, UploadResponse, ValidationErrorResponse};

const ALLOWED_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/jpg"];

#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored; the returned path is served under /uploads", body = UploadResponse),
        (status = 400, description = "Missing file, disallowed type, or file too large", body = ValidationErrorResponse)
    )
)]
pub async fn upload_poster_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::field("poster", err.to_string()))?
    {
        if field.name() != Some("poster") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !ALLOWED_TYPES.contains(&content_type.as_str()) {
            return Err(ApiError::field(
                "poster",
                "Invalid file type. Only JPEG, PNG and JPG are allowed.",
            ));
        }

        let extension = field
            .file_name()
            .and_then(|name| FilePath::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();

        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiError::field("poster", err.to_string()))?;
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ApiError::field("poster", "File exceeds the 5MB limit"));
        }

        let stored_name = format!(
            "poster-{}-{:09}{}",
            Utc::now().timestamp_millis(),
            rand::thread_rng().gen_range(0..1_000_000_000u32),
            extension
        );

        tokio::fs::create_dir_all(&state.upload_dir)
            .await
            .map_err(|err| ApiError::Internal(err.to_string()))?;
        tokio::fs::write(state.upload_dir.join(&stored_name), &bytes)
            .await
            .map_err(|err| ApiError::Internal(err.to_string()))?;

        return Ok(Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            file_path: format!("/uploads/{}", stored_name),
        }));
    }

    Err(ApiError::field("poster", "No file uploaded"))
}
