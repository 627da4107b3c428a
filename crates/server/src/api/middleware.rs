//! Metrics middleware for HTTP routes.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::{
    normalize_path, HTTP_REQUESTS_IN_FLIGHT, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION,
};

/// Feeds `mediaforge_http_request_duration_seconds`,
/// `mediaforge_http_requests_total` and `mediaforge_http_requests_in_flight`.
///
/// Download URLs are labelled `/download/{filename}` so converted file names
/// do not become label values. A long upload batch stays in flight until
/// its last file is converted.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let route = normalize_path(request.uri().path());
    let started = Instant::now();

    HTTP_REQUESTS_IN_FLIGHT.inc();
    let response = next.run(request).await;
    HTTP_REQUESTS_IN_FLIGHT.dec();

    let status = response.status();
    let labels = [method.as_str(), route.as_str(), status.as_str()];
    HTTP_REQUEST_DURATION
        .with_label_values(&labels)
        .observe(started.elapsed().as_secs_f64());
    HTTP_REQUESTS_TOTAL.with_label_values(&labels).inc();

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn dummy_handler() -> &'static str {
        "OK"
    }

    #[tokio::test]
    async fn test_requests_are_counted_by_normalized_path() {
        let app = Router::new()
            .route("/download/{filename}", get(dummy_handler))
            .layer(middleware::from_fn(metrics_middleware));

        let before = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/download/{filename}", "200"])
            .get();

        let request = Request::builder()
            .uri("/download/clip_converted.mp4")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let after = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/download/{filename}", "200"])
            .get();
        assert!(after > before);
    }

    #[tokio::test]
    async fn test_error_responses_are_counted_by_status() {
        let app = Router::new()
            .route(
                "/download/{filename}",
                get(|| async { StatusCode::NOT_FOUND }),
            )
            .layer(middleware::from_fn(metrics_middleware));

        let before = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/download/{filename}", "404"])
            .get();

        let request = Request::builder()
            .uri("/download/..hidden")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let after = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/download/{filename}", "404"])
            .get();
        assert!(after > before);
    }
}
