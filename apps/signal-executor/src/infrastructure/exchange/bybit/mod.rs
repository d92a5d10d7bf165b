//! Bybit V5 Exchange Adapter
//!
//! Implementation of `ExchangePort` for the Bybit unified trading API with:
//! - HMAC-SHA256 signed requests
//! - Spot and linear (USDT perpetual) categories
//! - Environment-aware safety logging (DEMO vs LIVE)
//! - A session factory opening one authenticated client per signal

mod adapter;
mod api_types;
mod config;
mod error;
mod http_client;
mod signer;

pub use adapter::{BybitExchangeAdapter, BybitSessionFactory};
pub use config::{BybitConfig, BybitEnvironment};
pub use error::BybitError;
pub use signer::RequestSigner;
