// handlers/protected/upload.rs - POST /api/upload

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Extension, Json,
};

use crate::auth::Session;
use crate::error::ApiError;
use crate::services::{FileUpload, UploadError};
use crate::state::AppState;
use crate::storage::UploadedBlob;

/// POST /api/upload - store an image from the `file` form field
///
/// Expected Output:
/// ```json
/// { "url": "https://.../uploads/<blob>", "blobName": "<uuid>-logo.png" }
/// ```
pub async fn post(
    State(state): State<AppState>,
    session: Option<Extension<Session>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadedBlob>, ApiError> {
    let Some(Extension(session)) = session else {
        return Err(UploadError::Unauthenticated.into());
    };
    let multipart = multipart.map_err(|e| UploadError::Multipart(e.body_text()))?;

    let file = read_file_field(multipart, state.uploads.max_bytes()).await?;
    let blob = state.uploads.upload(&session, file).await?;
    Ok(Json(blob))
}

/// Pull the `file` field out of the form, keeping at most `limit + 1` bytes
async fn read_file_field(mut multipart: Multipart, limit: usize) -> Result<Option<FileUpload>, UploadError> {
    while let Some(mut field) = multipart.next_field().await.map_err(|e| multipart_error(e, limit))? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        // Drain the whole field but keep only enough to know it is oversized;
        // the service decides which check failed
        let mut bytes = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(|e| multipart_error(e, limit))? {
            if bytes.len() <= limit {
                bytes.extend_from_slice(&chunk);
            }
        }
        bytes.truncate(limit + 1);

        return Ok(Some(FileUpload {
            file_name,
            content_type,
            bytes,
        }));
    }

    Ok(None)
}

fn multipart_error(err: MultipartError, limit: usize) -> UploadError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge { limit }
    } else {
        UploadError::Multipart(err.body_text())
    }
}
