//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless business logic (parsing, sizing)
//! - **Outcomes**: Per-symbol stages and signal reports
//!
//! # Bounded Contexts
//!
//! - [`signal`]: Chat text to trade signal
//! - [`sizing`]: Quantities and take-profit prices under instrument constraints
//! - [`execution`]: Venues, intents, stages and reports

pub mod execution;
pub mod shared;
pub mod signal;
pub mod sizing;
