//! Signal Bounded Context
//!
//! Parsing of chat messages into trade signals.

mod direction;
mod parser;

pub use direction::Direction;
pub use parser::{Signal, parse_signal};
