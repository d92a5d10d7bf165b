// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Signal Executor - Rust Core Library
//!
//! Turns short chat trading signals into Bybit orders for one venue.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic with no I/O
//!   - `signal`: free-text signal parsing
//!   - `sizing`: quantity sizing, step rounding, take-profit prices
//!   - `execution`: venues, trade intents, per-symbol stages and reports
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `ExchangePort` and `SessionFactory`
//!   - `use_cases`: `SignalExecutor`, `SpotSequencer`, `FuturesSequencer`
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `exchange`: Bybit V5 REST adapter
//!   - `websocket`: inbound signal server
//!   - `config`: environment-driven settings

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Prometheus metrics.
pub mod observability;

/// Tracing subscriber and OpenTelemetry export.
pub mod telemetry;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::execution::{
    ExecutionError, SignalReport, SymbolOutcome, SymbolStage, TakeProfitOutcome, TradeIntent,
    Venue,
};
pub use domain::shared::{OrderSide, Ticker};
pub use domain::signal::{Direction, Signal, parse_signal};
pub use domain::sizing::{InstrumentConstraints, QuantitySizer, TakeProfitPolicy};

// Application re-exports
pub use application::ports::{ExchangeError, ExchangePort, SessionFactory};
pub use application::use_cases::{ExecutionSettings, SignalExecutor};

// Infrastructure re-exports
pub use infrastructure::config::{ConfigError, ExecutorConfig};
pub use infrastructure::exchange::{
    BybitConfig, BybitEnvironment, BybitError, BybitExchangeAdapter, BybitSessionFactory,
};
pub use infrastructure::websocket::{ServerError, SignalServer};
