//! Prometheus metrics for the signal executor.
//!
//! Counters are derived from the [`SignalReport`] produced for every inbound
//! message, so the pipeline itself stays free of metric calls.
//!
//! # Example
//!
//! ```ignore
//! use signal_executor::observability::{init_metrics, MetricsConfig};
//!
//! init_metrics(&MetricsConfig::with_port(9090))?;
//! ```

use std::net::SocketAddr;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::domain::execution::{SignalReport, TakeProfitOutcome, Venue};

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for signal handling latency (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl MetricsConfig {
    /// Listen on all interfaces at `port`.
    #[must_use]
    pub fn with_port(port: u16) -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            // 10ms to 30s: one signal is a handful of sequential REST calls
            latency_buckets: vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0],
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    describe_metrics();

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

fn describe_metrics() {
    describe_counter!("signals_received_total", "Inbound messages taken off the queue");
    describe_counter!("signals_ignored_total", "Messages that did not parse as a signal");
    describe_counter!(
        "signals_abandoned_total",
        "Signals dropped before any symbol ran"
    );
    describe_counter!("orders_placed_total", "Entry orders accepted by the venue");
    describe_counter!("order_rejection_total", "Symbols that failed before or at entry");
    describe_counter!("take_profits_total", "Take-profit legs by result");
    describe_histogram!(
        "signal_handling_seconds",
        "Time from dequeue to report for one message"
    );
}

// ============================================================================
// Labels
// ============================================================================

/// Result label for the take-profit counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeProfitResult {
    /// Accepted by the venue.
    Placed,
    /// Deliberately not placed.
    Skipped,
    /// Refused by the venue.
    Rejected,
}

impl TakeProfitResult {
    /// Label value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Skipped => "skipped",
            Self::Rejected => "rejected",
        }
    }

    fn from_outcome(outcome: &TakeProfitOutcome) -> Option<Self> {
        match outcome {
            TakeProfitOutcome::NotAttempted => None,
            TakeProfitOutcome::Placed { .. } => Some(Self::Placed),
            TakeProfitOutcome::Skipped { .. } => Some(Self::Skipped),
            TakeProfitOutcome::Rejected { .. } => Some(Self::Rejected),
        }
    }
}

fn venue_label(venue: Venue) -> &'static str {
    venue.category()
}

// ============================================================================
// Signal Metrics
// ============================================================================

/// Record the counters for one handled message.
///
/// Safe to call without an installed recorder; the calls are then no-ops.
pub fn record_signal_report(report: &SignalReport, latency_seconds: f64) {
    let venue = venue_label(report.venue);

    counter!("signals_received_total", "venue" => venue).increment(1);
    histogram!("signal_handling_seconds", "venue" => venue).record(latency_seconds);

    if report.is_ignored() {
        counter!("signals_ignored_total", "venue" => venue).increment(1);
        return;
    }

    if let Some(error) = &report.abandoned {
        counter!(
            "signals_abandoned_total",
            "venue" => venue,
            "reason" => error.kind()
        )
        .increment(1);
        return;
    }

    for outcome in &report.outcomes {
        if outcome.order.accepted {
            counter!("orders_placed_total", "venue" => venue).increment(1);
        } else if let Some(error) = &outcome.failure {
            counter!(
                "order_rejection_total",
                "venue" => venue,
                "reason" => error.kind()
            )
            .increment(1);
        }

        if let Some(result) = TakeProfitResult::from_outcome(&outcome.take_profit) {
            counter!(
                "take_profits_total",
                "venue" => venue,
                "result" => result.as_str()
            )
            .increment(1);
        }
    }
}
