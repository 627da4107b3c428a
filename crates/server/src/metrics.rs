//! Prometheus metrics for observability.
//!
//! HTTP request metrics live here; conversion metrics are defined in
//! `mediaforge_core::metrics` and registered into the same registry.

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "mediaforge_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("mediaforge_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "mediaforge_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

/// Bytes served from the converted directory.
pub static DOWNLOAD_BYTES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "mediaforge_download_bytes_total",
            "Bytes of converted files served",
        ),
        &["format"],
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();
    registry
        .register(Box::new(DOWNLOAD_BYTES_TOTAL.clone()))
        .unwrap();

    // Core metrics (conversions, batches, retention)
    for metric in mediaforge_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

static DOWNLOAD_PATH: Lazy<regex_lite::Regex> =
    Lazy::new(|| regex_lite::Regex::new(r"^/download/.+$").unwrap());

/// Normalize a path for metric labels (replace file names with placeholders).
pub fn normalize_path(path: &str) -> String {
    DOWNLOAD_PATH
        .replace(path, "/download/{filename}")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_download() {
        assert_eq!(
            normalize_path("/download/photo_converted.jpg"),
            "/download/{filename}"
        );
        assert_eq!(
            normalize_path("/download/a%20b_converted.mp3"),
            "/download/{filename}"
        );
    }

    #[test]
    fn test_normalize_path_static_routes() {
        assert_eq!(normalize_path("/upload"), "/upload");
        assert_eq!(normalize_path("/health"), "/health");
        assert_eq!(normalize_path("/download/"), "/download/");
    }

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();

        let output = encode_metrics();
        assert!(output.contains("mediaforge_http_requests_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }

    #[test]
    fn test_registry_contains_core_metrics() {
        mediaforge_core::metrics::CONVERSIONS_TOTAL
            .with_label_values(&["image", "success"])
            .inc();
        mediaforge_core::metrics::ARTIFACTS_EXPIRED.inc_by(0);
        HTTP_REQUESTS_IN_FLIGHT.set(0);

        let output = encode_metrics();

        assert!(output.contains("mediaforge_http_requests_in_flight"));
        assert!(output.contains("mediaforge_conversions_total"));
        assert!(output.contains("mediaforge_artifacts_expired_total"));
    }
}
