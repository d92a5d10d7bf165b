//! Sizing Bounded Context
//!
//! Order quantities and take-profit prices computed against exchange
//! instrument constraints.

mod constraints;
mod rounding;
mod sizer;
mod take_profit;

pub use constraints::InstrumentConstraints;
pub use rounding::{round_down_to_step, round_to_step, round_up_to_step};
pub use sizer::QuantitySizer;
pub use take_profit::{SpotTakeProfit, TakeProfitPolicy};
