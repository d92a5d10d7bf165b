//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod execute_signal;
mod futures_sequencer;
mod pipeline;
mod spot_sequencer;

#[cfg(test)]
pub(crate) mod testing;

pub use execute_signal::{ExecutionSettings, SignalExecutor};
pub use futures_sequencer::FuturesSequencer;
pub use spot_sequencer::SpotSequencer;
