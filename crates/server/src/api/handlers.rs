use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use mediaforge_core::SanitizedConfig;

use crate::metrics::encode_metrics;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<SanitizedConfig> {
    Json(state.sanitized_config())
}

/// GET /metrics
pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        encode_metrics(),
    )
}
