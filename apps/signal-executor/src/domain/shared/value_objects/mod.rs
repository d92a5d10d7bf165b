//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.
//! Value objects are compared by value, not identity.

mod side;
mod ticker;

pub use side::OrderSide;
pub use ticker::Ticker;
