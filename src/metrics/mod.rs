//! Prometheus metrics for hashpulse
//!
//! This module provides metrics tracking for:
//! - Analytics queries: count by operation and outcome, duration
//! - Ingestion: observations recorded, tracked hashtag count
//! - HTTP API: requests by route and status
//!
//! # Usage
//!
//! Call `init_metrics()` at application startup to register all metrics.
//! Until then, and if initialization fails, metrics operations are no-ops.

use prometheus::{
    register_counter, register_counter_vec, register_gauge, register_histogram_vec, Counter,
    CounterVec, Encoder, Gauge, HistogramVec, TextEncoder,
};
use std::sync::OnceLock;

/// Container for all hashpulse metrics
struct HashpulseMetrics {
    queries: CounterVec,
    query_duration: HistogramVec,
    observations_ingested: Counter,
    tracked_hashtags: Gauge,
    api_requests: CounterVec,
}

static METRICS: OnceLock<HashpulseMetrics> = OnceLock::new();

/// Flag to track if initialization was attempted
static METRICS_INIT_ATTEMPTED: OnceLock<bool> = OnceLock::new();

/// Query outcome label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    NotFound,
    Invalid,
    Error,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NotFound => "not_found",
            Self::Invalid => "invalid",
            Self::Error => "error",
        }
    }

    /// Outcome label for a service result
    pub fn of<T>(result: &crate::error::Result<T>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(crate::error::Error::NotFound { .. }) => Self::NotFound,
            Err(crate::error::Error::InvalidInput(_)) => Self::Invalid,
            Err(_) => Self::Error,
        }
    }
}

/// Initialize all Prometheus metrics
///
/// Safe to call more than once; only the first call registers anything.
///
/// # Example
///
/// ```ignore
/// if let Err(e) = hashpulse::metrics::init_metrics() {
///     tracing::warn!(error = %e, "Metrics initialization failed");
/// }
/// ```
pub fn init_metrics() -> Result<(), Box<dyn std::error::Error>> {
    if METRICS_INIT_ATTEMPTED.get().is_some() {
        return Ok(());
    }
    METRICS_INIT_ATTEMPTED.set(true).ok();

    let metrics = HashpulseMetrics {
        queries: register_counter_vec!(
            "hashpulse_queries_total",
            "Total analytics queries by operation and outcome",
            &["operation", "outcome"]
        )?,
        query_duration: register_histogram_vec!(
            "hashpulse_query_duration_seconds",
            "Analytics query duration in seconds",
            &["operation"],
            vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
        )?,
        observations_ingested: register_counter!(
            "hashpulse_observations_ingested_total",
            "Total observations recorded"
        )?,
        tracked_hashtags: register_gauge!(
            "hashpulse_tracked_hashtags",
            "Number of tracked (hashtag, platform) pairs"
        )?,
        api_requests: register_counter_vec!(
            "hashpulse_api_requests_total",
            "Total API requests by route and status",
            &["route", "status"]
        )?,
    };

    METRICS
        .set(metrics)
        .map_err(|_| "Metrics already initialized")?;

    tracing::info!("Prometheus metrics initialized successfully");
    Ok(())
}

/// Check if metrics have been initialized
pub fn metrics_initialized() -> bool {
    METRICS.get().is_some()
}

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record one analytics query
pub fn record_query(operation: &str, outcome: Outcome) {
    if let Some(m) = METRICS.get() {
        m.queries
            .with_label_values(&[operation, outcome.as_str()])
            .inc();
    }
}

/// Record ingested observations and the current tracked count
pub fn record_ingest(observations: u64, tracked: usize) {
    let Some(m) = METRICS.get() else {
        return;
    };

    if observations > 0 {
        m.observations_ingested.inc_by(observations as f64);
    }
    m.tracked_hashtags.set(tracked as f64);
}

/// Record an API request
pub fn record_api_request(route: &str, status: u16) {
    if let Some(m) = METRICS.get() {
        let status_str = status.to_string();
        m.api_requests
            .with_label_values(&[route, &status_str])
            .inc();
    }
}

/// Histogram timer guard that records duration on drop
pub struct MetricsTimer {
    timer: Option<prometheus::HistogramTimer>,
}

impl MetricsTimer {
    fn new(timer: prometheus::HistogramTimer) -> Self {
        Self { timer: Some(timer) }
    }

    /// Create a no-op timer when metrics are not initialized
    fn noop() -> Self {
        Self { timer: None }
    }
}

impl Drop for MetricsTimer {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop_and_record();
        }
    }
}

/// Start a query timer for an operation
pub fn start_query_timer(operation: &str) -> MetricsTimer {
    match METRICS.get() {
        Some(m) => MetricsTimer::new(
            m.query_duration
                .with_label_values(&[operation])
                .start_timer(),
        ),
        None => MetricsTimer::noop(),
    }
}
