//! Observability module for metrics.
//!
//! Prometheus export of signal, order and take-profit counters. Tracing
//! setup lives in [`crate::telemetry`].

mod metrics;

pub use metrics::{
    MetricsConfig, MetricsError, TakeProfitResult, init_metrics, record_signal_report,
};
