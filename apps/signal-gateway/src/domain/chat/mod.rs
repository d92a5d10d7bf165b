//! Chat Input Types
//!
//! Inbound chat messages and their classification into gateway commands or
//! signal text to forward.

use crate::domain::routing::{ChatId, Route};

/// One inbound text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Update sequence number; the next poll starts after it.
    pub update_id: i64,
    /// Originating chat.
    pub chat_id: ChatId,
    /// Message text, if any.
    pub text: Option<String>,
}

/// Commands the gateway understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayCommand {
    /// `/start`: show help.
    Start,
    /// `/spot` or `/futures`: switch the chat's route.
    Switch(Route),
}

/// Classified chat input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    /// A known command.
    Command(GatewayCommand),
    /// Text to forward, trimmed.
    Signal(String),
    /// Empty text or an unknown command.
    Ignore,
}

impl ChatInput {
    /// Classify message text.
    ///
    /// Commands may carry a `@botname` suffix (`/spot@relay_bot`) and
    /// trailing arguments, both ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::Ignore;
        }

        let Some(command) = text.strip_prefix('/') else {
            return Self::Signal(text.to_string());
        };

        let name = command
            .split_whitespace()
            .next()
            .and_then(|token| token.split('@').next())
            .unwrap_or_default()
            .to_lowercase();

        match name.as_str() {
            "start" => Self::Command(GatewayCommand::Start),
            "spot" => Self::Command(GatewayCommand::Switch(Route::Spot)),
            "futures" => Self::Command(GatewayCommand::Switch(Route::Futures)),
            _ => Self::Ignore,
        }
    }
}
