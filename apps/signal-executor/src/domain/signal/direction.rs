//! Trade direction carried by a signal.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::execution::Venue;
use crate::domain::shared::OrderSide;

/// Direction of a parsed signal.
///
/// Spot venues read `Long` as a buy and `Short` as a sell of the base asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Bullish signal.
    Long,
    /// Bearish signal.
    Short,
}

impl Direction {
    /// Side of the entry order for this direction.
    #[must_use]
    pub const fn entry_side(&self) -> OrderSide {
        match self {
            Self::Long => OrderSide::Buy,
            Self::Short => OrderSide::Sell,
        }
    }

    /// Venue-specific label used in log lines.
    #[must_use]
    pub const fn label_for(&self, venue: Venue) -> &'static str {
        match (venue, self) {
            (Venue::Futures, Self::Long) => "LONG",
            (Venue::Futures, Self::Short) => "SHORT",
            (Venue::Spot, Self::Long) => "BUY",
            (Venue::Spot, Self::Short) => "SELL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "LONG"),
            Self::Short => write!(f, "SHORT"),
        }
    }
}
