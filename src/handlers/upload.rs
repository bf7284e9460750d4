//! POST /upload: multipart form with a single binary `file` part.

use crate::error::AppError;
use crate::response::success_ok;
use crate::state::AppState;
use crate::upload::{is_textual, Upload};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::IntoResponse;

pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("file part must carry a file name".into()))?;
        let content_type = field.content_type().map(str::to_string);
        if content_type.as_deref().is_some_and(is_textual) {
            return Err(AppError::Validation("file must be binary content, not text".into()));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("file is empty".into()));
        }
        upload = Some(Upload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }
    let upload = upload.ok_or_else(|| AppError::Validation("file is required".into()))?;

    let assets = state
        .assets
        .as_ref()
        .ok_or_else(|| AppError::Upstream("asset host is not configured".into()))?;
    tracing::info!(file = %upload.file_name, size = upload.bytes.len(), "uploading asset");
    let descriptor = assets.store(upload).await?;
    Ok(success_ok("File uploaded successfully", descriptor))
}
