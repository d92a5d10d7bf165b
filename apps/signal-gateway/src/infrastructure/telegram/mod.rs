//! Telegram Bot API Adapter
//!
//! Long-polling `getUpdates` and `sendMessage` over `reqwest`, exposed to
//! the application layer as a [`ChatPort`](crate::application::ports::ChatPort).

mod client;
mod config;
mod error;
mod types;

pub use client::TelegramClient;
pub use config::{DEFAULT_API_URL, DEFAULT_POLL_TIMEOUT, TelegramConfig};
pub use error::TelegramError;
