use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{download, handlers, middleware::metrics_middleware, upload};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = usize::try_from(state.config().limits.max_request_size_bytes)
        .unwrap_or(usize::MAX);

    Router::new()
        .route("/", get(handlers::index))
        .route("/upload", post(upload::upload))
        .route("/download/{filename}", get(download::download))
        // Service endpoints
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
