//! Infrastructure Layer - Adapters and external integrations.
//!
//! This layer contains the concrete implementations of the port interfaces
//! defined in the application layer.

/// Configuration loaded from the environment.
pub mod config;

/// Websocket delivery to the executors.
pub mod relay;

/// Telegram Bot API client.
pub mod telegram;

/// Logging setup.
pub mod telemetry;
