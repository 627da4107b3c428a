//! Upload endpoint.

use axum::{
    extract::{multipart::{MultipartError, MultipartRejection}, Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{debug, warn};

use mediaforge_core::{BatchResult, UploadedFile};

use super::{api_error, ApiError};
use crate::state::AppState;

/// Multipart field carrying the files to convert (repeatable).
pub const FILES_FIELD: &str = "files";
/// Multipart field carrying the target extension.
pub const FORMAT_FIELD: &str = "format";

/// POST /upload
///
/// Converts every uploaded file to the selected format. Per-file failures
/// are reported in `errors` alongside a 200; only a missing/unsupported
/// format or an empty file list fail the whole request.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<BatchResult>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        debug!(error = %rejection, "Upload body is not multipart");
        api_error(rejection.status(), rejection.body_text())
    })?;
    let mut files: Vec<UploadedFile> = Vec::new();
    let mut format: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            FILES_FIELD => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                debug!(file = %filename, size = bytes.len(), "Received upload part");
                files.push(UploadedFile::new(filename, bytes.to_vec()));
            }
            FORMAT_FIELD => {
                format = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let target = state
        .batch()
        .validator()
        .check_request(format.as_deref(), files.len())
        .map_err(|e| {
            debug!(error = %e, "Upload request rejected");
            api_error(StatusCode::BAD_REQUEST, e.to_string())
        })?;

    Ok(Json(state.batch().process(&target, files).await))
}

/// Maps a multipart read failure. Bodies over the request ceiling surface
/// here as 413.
fn multipart_error(e: MultipartError) -> ApiError {
    let status = e.status();
    warn!(error = %e, status = %status, "Failed to read multipart body");
    let status = if status == StatusCode::PAYLOAD_TOO_LARGE {
        status
    } else {
        StatusCode::BAD_REQUEST
    };
    api_error(status, e.body_text())
}
