//! Execution Bounded Context
//!
//! Venues, trade intents, per-symbol stages and the reports produced when a
//! signal is executed.

mod errors;
mod intent;
mod outcome;
mod stage;
mod venue;

pub use errors::ExecutionError;
pub use intent::TradeIntent;
pub use outcome::{OrderResult, SignalReport, SymbolOutcome, TakeProfitOutcome};
pub use stage::SymbolStage;
pub use venue::Venue;
