//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Per-file conversion outcomes and durations
//! - Batch sizes
//! - Retention sweeps

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Conversion Metrics
// =============================================================================

/// Files processed by category and result.
pub static CONVERSIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("mediaforge_conversions_total", "Total file conversions"),
        &["category", "result"], // result: "success", "rejected", "encoder_error", "internal_error"
    )
    .unwrap()
});

/// Encoder wall time in seconds.
pub static CONVERSION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "mediaforge_conversion_duration_seconds",
            "Duration of encoder invocations",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 300.0]),
        &["category"],
    )
    .unwrap()
});

/// Files per upload batch.
pub static BATCH_SIZE: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("mediaforge_batch_size", "Number of files per upload batch")
            .buckets(vec![1.0, 2.0, 3.0, 5.0, 10.0, 20.0, 50.0]),
    )
    .unwrap()
});

// =============================================================================
// Retention Metrics
// =============================================================================

/// Converted artifacts removed by the retention sweeper.
pub static ARTIFACTS_EXPIRED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "mediaforge_artifacts_expired_total",
        "Converted files removed by the retention sweeper",
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CONVERSIONS_TOTAL.clone()),
        Box::new(CONVERSION_DURATION.clone()),
        Box::new(BATCH_SIZE.clone()),
        Box::new(ARTIFACTS_EXPIRED.clone()),
    ]
}
