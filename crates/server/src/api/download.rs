//! Download endpoint for converted files.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

use mediaforge_core::FormatRegistry;

use super::{api_error, ApiError};
use crate::metrics::DOWNLOAD_BYTES_TOTAL;
use crate::state::AppState;

/// GET /download/{filename}
///
/// Streams a converted file as an attachment. Names that are not plain file
/// names inside the converted directory are answered with 404.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let not_found = || api_error(StatusCode::NOT_FOUND, format!("File not found: {}", filename));

    let Some(path) = state.batch().storage().resolve_download(&filename) else {
        debug!(file = %filename, "Rejected download name");
        return Err(not_found());
    };

    let read_failed = |e: std::io::Error| {
        warn!(path = ?path, error = %e, "Failed to read converted file");
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to read file: {}", filename),
        )
    };

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(read_failed(e)),
    };
    let len = file.metadata().await.map_err(read_failed)?.len();

    let extension = FormatRegistry::extension_of(&filename).unwrap_or_default();
    DOWNLOAD_BYTES_TOTAL
        .with_label_values(&[&extension])
        .inc_by(len);

    Ok((
        [
            (
                header::CONTENT_TYPE,
                FormatRegistry::content_type(&extension).to_string(),
            ),
            (header::CONTENT_LENGTH, len.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response())
}
