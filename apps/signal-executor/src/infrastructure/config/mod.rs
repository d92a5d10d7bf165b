//! Configuration Module
//!
//! Environment-driven configuration for the signal executor.

mod settings;

pub use settings::{
    ConfigError, Credentials, ExchangeSettings, ExecutorConfig, ServerSettings, TradeSettings,
};
