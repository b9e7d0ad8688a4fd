//! Prometheus Metrics
//!
//! All collectors live in one [`Metrics`] value registered against a
//! private registry and exposed in text format at `GET /metrics`.
//!
//! - `branch_service_http_requests_total{method, path, status}`
//! - `branch_service_http_request_duration_seconds{method, path}`
//! - `branch_service_db_query_duration_seconds{operation, table}`
//! - `branch_service_holiday_changes_total{action}`

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

const NAMESPACE: &str = "branch_service";

const HTTP_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];
const DB_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5];

/// Process-wide collectors.
struct Metrics {
    registry: Registry,
    http_requests: IntCounterVec,
    http_duration: HistogramVec,
    db_duration: HistogramVec,
    holiday_changes: IntCounterVec,
}

impl Metrics {
    fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let http_requests = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests").namespace(NAMESPACE),
            &["method", "path", "status"],
        )?;
        let http_duration = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "HTTP request latency in seconds")
                .namespace(NAMESPACE)
                .buckets(HTTP_BUCKETS.to_vec()),
            &["method", "path"],
        )?;
        let db_duration = HistogramVec::new(
            HistogramOpts::new("db_query_duration_seconds", "Database query latency in seconds")
                .namespace(NAMESPACE)
                .buckets(DB_BUCKETS.to_vec()),
            &["operation", "table"],
        )?;
        let holiday_changes = IntCounterVec::new(
            Opts::new(
                "holiday_changes_total",
                "Holiday calendar entries added to or removed from branches",
            )
            .namespace(NAMESPACE),
            &["action"],
        )?;

        registry.register(Box::new(http_requests.clone()))?;
        registry.register(Box::new(http_duration.clone()))?;
        registry.register(Box::new(db_duration.clone()))?;
        registry.register(Box::new(holiday_changes.clone()))?;

        Ok(Self {
            registry,
            http_requests,
            http_duration,
            db_duration,
            holiday_changes,
        })
    }
}

static METRICS: Lazy<Metrics> =
    Lazy::new(|| Metrics::new().expect("metric definitions are valid and unique"));

/// Encode every registered collector in Prometheus text format.
pub fn gather_metrics() -> String {
    let mut buffer = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&METRICS.registry.gather(), &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status = status.to_string();
    METRICS
        .http_requests
        .with_label_values(&[method, path, status.as_str()])
        .inc();
    METRICS
        .http_duration
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

pub fn record_db_query(operation: &str, table: &str, duration_secs: f64) {
    METRICS
        .db_duration
        .with_label_values(&[operation, table])
        .observe(duration_secs);
}

/// Count holiday entries changed by one operation (`action` is `added` or `removed`).
pub fn record_holiday_changes(action: &str, count: usize) {
    METRICS
        .holiday_changes
        .with_label_values(&[action])
        .inc_by(count as u64);
}
