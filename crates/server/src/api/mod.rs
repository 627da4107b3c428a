pub mod download;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod upload;

pub use routes::create_router;

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Error body shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: Vec<String>,
}

/// Rejection returned by handlers.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            errors: vec![message.into()],
        }),
    )
}
