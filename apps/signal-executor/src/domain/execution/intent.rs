//! Trade intent for one symbol of a signal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{OrderSide, Ticker};
use crate::domain::signal::Direction;

/// What the executor intends to do for a single symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeIntent {
    /// Base-asset ticker.
    pub symbol: Ticker,
    /// Direction from the signal.
    pub direction: Direction,
    /// Fixed notional in quote currency.
    pub notional: Decimal,
    /// Leverage multiplier, futures only.
    pub leverage: Option<u32>,
}

impl TradeIntent {
    /// Create an unleveraged intent.
    #[must_use]
    pub const fn new(symbol: Ticker, direction: Direction, notional: Decimal) -> Self {
        Self {
            symbol,
            direction,
            notional,
            leverage: None,
        }
    }

    /// Attach a leverage multiplier.
    #[must_use]
    pub const fn with_leverage(mut self, leverage: u32) -> Self {
        self.leverage = Some(leverage);
        self
    }

    /// Side of the entry order.
    #[must_use]
    pub const fn entry_side(&self) -> OrderSide {
        self.direction.entry_side()
    }
}
