//! Port Interfaces
//!
//! Defines the interfaces (ports) for external systems following
//! the Hexagonal Architecture pattern.
//!
//! ## Driven Ports (Outbound)
//!
//! - `ChatPort`: long-polling chat API (updates in, replies out)
//! - `SignalSink`: delivery of signal text to an executor

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::chat::ChatMessage;
use crate::domain::routing::{ChatId, Route};

// =============================================================================
// Chat Port
// =============================================================================

/// Chat port error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// The chat API could not be reached.
    #[error("chat API unreachable: {message}")]
    Unreachable {
        /// Error details.
        message: String,
    },

    /// The chat API refused the call.
    #[error("chat API error {code}: {description}")]
    Rejected {
        /// API error code.
        code: i64,
        /// API description.
        description: String,
    },

    /// The response could not be interpreted.
    #[error("invalid chat API response: {message}")]
    InvalidResponse {
        /// Error details.
        message: String,
    },
}

/// Long-polling chat API.
#[async_trait]
pub trait ChatPort: Send + Sync {
    /// Wait for messages with `update_id >= offset`.
    async fn poll(&self, offset: Option<i64>) -> Result<Vec<ChatMessage>, ChatError>;

    /// Discard everything queued so far and return the offset to poll from.
    async fn skip_pending(&self) -> Result<Option<i64>, ChatError>;

    /// Send a text reply.
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), ChatError>;
}

// =============================================================================
// Signal Sink
// =============================================================================

/// Signal delivery error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Could not open a connection to the executor.
    #[error("cannot connect to {url}: {message}")]
    Connect {
        /// Executor URL.
        url: String,
        /// Error details.
        message: String,
    },

    /// Connection opened but the frame was not sent.
    #[error("send to {url} failed: {message}")]
    Send {
        /// Executor URL.
        url: String,
        /// Error details.
        message: String,
    },

    /// Connecting took too long.
    #[error("timed out connecting to {url}")]
    Timeout {
        /// Executor URL.
        url: String,
    },
}

/// Delivers signal text to the executor behind a route. No retries.
#[async_trait]
pub trait SignalSink: Send + Sync {
    /// Deliver `text` to the executor for `route`.
    async fn forward(&self, text: &str, route: Route) -> Result<(), RelayError>;
}
