//! Execution errors.

use serde::Serialize;

/// Errors raised while turning a signal into orders.
///
/// An unrecognized signal is not an error; the parser returns `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum ExecutionError {
    /// No usable last price; the symbol is abandoned.
    #[error("Price unavailable for {symbol}: {reason}")]
    PriceUnavailable {
        /// Instrument.
        symbol: String,
        /// Error details.
        reason: String,
    },

    /// Instrument constraints could not be fetched; execution continues degraded.
    #[error("Constraint lookup failed for {symbol}: {reason}")]
    ConstraintLookupFailed {
        /// Instrument.
        symbol: String,
        /// Error details.
        reason: String,
    },

    /// The venue refused an order (or it never reached the venue).
    #[error("Order rejected: {message}")]
    OrderRejected {
        /// Venue return code, when the venue answered.
        code: Option<i64>,
        /// Rejection message.
        message: String,
    },

    /// No exchange session could be opened; the whole signal is abandoned.
    #[error("Exchange transport unavailable: {reason}")]
    TransportUnavailable {
        /// Error details.
        reason: String,
    },
}

impl ExecutionError {
    /// Short snake_case label for logs and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PriceUnavailable { .. } => "price_unavailable",
            Self::ConstraintLookupFailed { .. } => "constraint_lookup_failed",
            Self::OrderRejected { .. } => "order_rejected",
            Self::TransportUnavailable { .. } => "transport_unavailable",
        }
    }

    /// Venue return code, if this error carries one.
    #[must_use]
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::OrderRejected { code, .. } => *code,
            _ => None,
        }
    }
}
