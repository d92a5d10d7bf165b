//! Instrument quantization constraints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-instrument quantization rules reported by the exchange.
///
/// Fetched fresh for every order and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentConstraints {
    /// Smallest accepted order quantity.
    pub min_qty: Decimal,
    /// Quantity increment.
    pub qty_step: Decimal,
    /// Price increment, when the venue reports one.
    pub tick_size: Option<Decimal>,
}

impl InstrumentConstraints {
    /// Create constraints without a price tick.
    #[must_use]
    pub const fn new(min_qty: Decimal, qty_step: Decimal) -> Self {
        Self {
            min_qty,
            qty_step,
            tick_size: None,
        }
    }

    /// Set the price tick.
    #[must_use]
    pub const fn with_tick_size(mut self, tick_size: Decimal) -> Self {
        self.tick_size = Some(tick_size);
        self
    }
}
