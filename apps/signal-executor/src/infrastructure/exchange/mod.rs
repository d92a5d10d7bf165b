//! Exchange Adapters
//!
//! Implementations of `ExchangePort` for supported venues.

pub mod bybit;

pub use bybit::{BybitConfig, BybitEnvironment, BybitError, BybitExchangeAdapter, BybitSessionFactory};
