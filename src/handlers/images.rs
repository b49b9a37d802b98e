//! Image upload handlers

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::handlers::AppState;
use crate::middleware::CurrentUser;
use crate::utils::errors::{GatherlyError, Result};

const DEFAULT_FOLDER: &str = "events";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteImageBody {
    pub url: String,
}

/// POST /images — multipart upload with an optional `folder` field
pub async fn upload_image(
    State(state): State<AppState>,
    CurrentUser(_context): CurrentUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    let mut folder = DEFAULT_FOLDER.to_string();
    let mut file: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatherlyError::Validation(e.to_string()))?
    {
        match field.name() {
            Some("folder") => {
                folder = field
                    .text()
                    .await
                    .map_err(|e| GatherlyError::Validation(e.to_string()))?;
            }
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| GatherlyError::Validation(e.to_string()))?;
                file = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    let data = file.ok_or_else(|| {
        GatherlyError::Validation("No image file provided".to_string())
    })?;

    let mut folder = crate::utils::helpers::sanitize_filename(folder.trim());
    if folder.is_empty() {
        folder = DEFAULT_FOLDER.to_string();
    }
    let url = state
        .services
        .storage_service
        .upload_image(&data, &folder)
        .await?;

    Ok((StatusCode::CREATED, Json(UploadResponse { url })))
}

/// DELETE /images — remove a previously uploaded object by its public URL
pub async fn delete_image(
    State(state): State<AppState>,
    CurrentUser(_context): CurrentUser,
    Json(body): Json<DeleteImageBody>,
) -> Result<StatusCode> {
    state.services.storage_service.delete_image(&body.url).await?;
    Ok(StatusCode::NO_CONTENT)
}
