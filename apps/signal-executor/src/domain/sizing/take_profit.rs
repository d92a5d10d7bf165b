//! Take-profit pricing.

use rust_decimal::Decimal;

use super::{InstrumentConstraints, round_down_to_step, round_to_step};
use crate::domain::signal::Direction;

/// Decimal places used for a futures trigger when the tick is unknown.
const FALLBACK_PRICE_DP: u32 = 2;

/// Take-profit price and quantity for a resting spot limit sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotTakeProfit {
    /// Limit price, floored to the price tick.
    pub price: Decimal,
    /// Sell quantity, floored to the quantity step.
    pub quantity: Decimal,
}

/// Fixed-percentage take-profit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TakeProfitPolicy {
    pct: Decimal,
}

impl TakeProfitPolicy {
    /// Create a policy with offset `pct` (0.15 = 15%).
    #[must_use]
    pub const fn new(pct: Decimal) -> Self {
        Self { pct }
    }

    /// Unrounded take-profit price for a position entered at `entry`.
    #[must_use]
    pub fn target_price(&self, entry: Decimal, direction: Direction) -> Decimal {
        match direction {
            Direction::Long => entry * (Decimal::ONE + self.pct),
            Direction::Short => entry * (Decimal::ONE - self.pct),
        }
    }

    /// Futures trigger price, rounded to `tick` when known, else to two
    /// decimal places.
    #[must_use]
    pub fn futures_trigger_price(
        &self,
        entry: Decimal,
        direction: Direction,
        tick: Option<Decimal>,
    ) -> Decimal {
        let target = self.target_price(entry, direction);
        match tick {
            Some(tick) if tick > Decimal::ZERO => round_to_step(target, tick),
            _ => target.round_dp(FALLBACK_PRICE_DP),
        }
    }

    /// Spot take-profit for a filled buy.
    ///
    /// Price is `reference * (1 + pct)` floored to the tick; quantity is
    /// `max(base_estimate, min_qty)` floored to the step.
    #[must_use]
    pub fn spot_take_profit(
        &self,
        reference: Decimal,
        base_estimate: Decimal,
        constraints: &InstrumentConstraints,
    ) -> SpotTakeProfit {
        let target = self.target_price(reference, Direction::Long);
        let price = constraints
            .tick_size
            .map_or(target, |tick| round_down_to_step(target, tick));
        let quantity = round_down_to_step(base_estimate.max(constraints.min_qty), constraints.qty_step);
        SpotTakeProfit { price, quantity }
    }
}
