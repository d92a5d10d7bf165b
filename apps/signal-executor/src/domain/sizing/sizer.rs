//! Quantity Sizer
//!
//! Converts a fixed notional into an order quantity the venue will accept.

use rust_decimal::Decimal;

use super::{InstrumentConstraints, round_up_to_step};

/// Sizes orders from a fixed notional (USD per trade, independent of leverage).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantitySizer {
    notional: Decimal,
}

impl QuantitySizer {
    /// Create a sizer for the given notional.
    #[must_use]
    pub const fn new(notional: Decimal) -> Self {
        Self { notional }
    }

    /// Unconstrained base quantity at `price`.
    ///
    /// Returns `None` for a non-positive price.
    #[must_use]
    pub fn raw_quantity(&self, price: Decimal) -> Option<Decimal> {
        if price <= Decimal::ZERO {
            return None;
        }
        Some(self.notional / price)
    }

    /// Futures entry quantity: `max(raw, min_qty)` rounded up to `qty_step`.
    ///
    /// Without constraints the raw quantity is returned as a best effort.
    #[must_use]
    pub fn futures_entry_quantity(
        &self,
        price: Decimal,
        constraints: Option<&InstrumentConstraints>,
    ) -> Option<Decimal> {
        let raw = self.raw_quantity(price)?;
        let Some(c) = constraints else {
            return Some(raw);
        };
        Some(round_up_to_step(raw.max(c.min_qty), c.qty_step))
    }
}
