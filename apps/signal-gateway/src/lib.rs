#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Signal Gateway - Chat to Executor Relay
//!
//! Long-polls a Telegram bot and forwards signal text to the spot or
//! futures executor over a short-lived websocket connection. Each chat
//! picks its executor with `/spot` or `/futures`.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: routes, per-chat route table, command classification
//! - **Application**: `ChatPort` / `SignalSink` ports and the gateway service
//! - **Infrastructure**: Telegram client, websocket sink, config, logging
//!
//! # Data Flow
//!
//! ```text
//! Telegram getUpdates ──► GatewayService ──► route table ──► ws://spot    (8765)
//!         ▲                    │                       └──► ws://futures (8766)
//!         └──── sendMessage ◄──┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - routing and chat input types.
pub mod domain;

/// Application layer - ports and the gateway service.
pub mod application;

/// Infrastructure layer - adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::ports::{ChatError, ChatPort, RelayError, SignalSink};
pub use application::services::{GatewayService, HELP_TEXT, HandleOutcome};
pub use domain::chat::{ChatInput, ChatMessage, GatewayCommand};
pub use domain::routing::{ChatId, Route, RouteTable, RouteTargets};
pub use infrastructure::config::{ConfigError, GatewayConfig};
pub use infrastructure::relay::WsSignalSink;
pub use infrastructure::telegram::{TelegramClient, TelegramConfig, TelegramError};
