//! Prometheus metrics for the item service.
//!
//! This module provides:
//! - Store mutation counters (created, updated, deleted)
//! - A gauge of items currently held
//! - HTTP request latency, labelled by method and route

use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::{Result, ServiceError};

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Items created counter metric name.
pub const METRIC_ITEMS_CREATED: &str = "items_created_total";
/// Items updated counter metric name.
pub const METRIC_ITEMS_UPDATED: &str = "items_updated_total";
/// Items deleted counter metric name.
pub const METRIC_ITEMS_DELETED: &str = "items_deleted_total";
/// Rejected create requests counter metric name.
pub const METRIC_VALIDATION_ERRORS: &str = "validation_errors_total";
/// Items currently stored gauge metric name.
pub const METRIC_ITEMS_STORED: &str = "items_stored";

/// Install the global Prometheus recorder and return a handle for rendering.
pub fn install_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServiceError::Metrics(e.to_string()))?;

    init_metrics();
    Ok(handle)
}

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    describe_counter!(METRIC_ITEMS_CREATED, "Total number of items created");
    describe_counter!(METRIC_ITEMS_UPDATED, "Total number of items updated");
    describe_counter!(METRIC_ITEMS_DELETED, "Total number of items deleted");
    describe_counter!(
        METRIC_VALIDATION_ERRORS,
        "Total number of create requests rejected for a missing name"
    );

    describe_gauge!(METRIC_ITEMS_STORED, "Number of items currently stored");

    debug!("Metrics initialized");
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, method: &str, route: &str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(latency_ms);
}

/// Increment items created counter.
pub fn inc_items_created() {
    counter!(METRIC_ITEMS_CREATED).increment(1);
}

/// Increment items updated counter.
pub fn inc_items_updated() {
    counter!(METRIC_ITEMS_UPDATED).increment(1);
}

/// Increment items deleted counter.
pub fn inc_items_deleted() {
    counter!(METRIC_ITEMS_DELETED).increment(1);
}

/// Increment validation errors counter.
pub fn inc_validation_errors() {
    counter!(METRIC_VALIDATION_ERRORS).increment(1);
}

/// Set the stored items gauge.
pub fn set_items_stored(count: usize) {
    gauge!(METRIC_ITEMS_STORED).set(count as f64);
}

/// RAII guard for timing a request.
/// Records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    method: String,
    route: String,
}

impl LatencyTimer {
    /// Start timing a request.
    pub fn new(method: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            method: method.into(),
            route: route.into(),
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_http_latency(self.start, &self.method, &self.route);
    }
}
