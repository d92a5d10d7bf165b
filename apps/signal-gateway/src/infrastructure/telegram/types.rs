//! Telegram Bot API wire types.
//!
//! Only the fields the gateway reads are modelled; everything else in an
//! update is skipped by serde.

use serde::{Deserialize, Serialize};

use crate::domain::chat::ChatMessage;

/// Response envelope shared by every Bot API method.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    /// `true` when the call succeeded.
    pub ok: bool,
    /// Method result, present when `ok`.
    pub result: Option<T>,
    /// Error description, present when not `ok`.
    pub description: Option<String>,
    /// Error code, present when not `ok`.
    pub error_code: Option<i64>,
}

/// One entry of `getUpdates`.
#[derive(Debug, Deserialize)]
pub struct Update {
    /// Monotonic update identifier.
    pub update_id: i64,
    /// Private or group message.
    pub message: Option<Message>,
    /// Channel post.
    pub channel_post: Option<Message>,
}

/// Message payload.
#[derive(Debug, Deserialize)]
pub struct Message {
    /// Originating chat.
    pub chat: Chat,
    /// Text, absent for media messages.
    pub text: Option<String>,
}

/// Chat reference.
#[derive(Debug, Deserialize)]
pub struct Chat {
    /// Chat identifier.
    pub id: i64,
}

impl Update {
    /// Convert into a chat message. Updates without a message are `None`.
    #[must_use]
    pub fn into_chat_message(self) -> Option<ChatMessage> {
        let update_id = self.update_id;
        self.message
            .or(self.channel_post)
            .map(|message| ChatMessage {
                update_id,
                chat_id: message.chat.id,
                text: message.text,
            })
    }
}

/// `getUpdates` request body.
#[derive(Debug, Serialize)]
pub struct GetUpdatesRequest {
    /// First update to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Long-poll timeout in seconds.
    pub timeout: u64,
    /// Update kinds to receive.
    pub allowed_updates: &'static [&'static str],
}

/// `sendMessage` request body.
#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    /// Target chat.
    pub chat_id: i64,
    /// Message text.
    pub text: &'a str,
}

/// Update kinds the gateway asks for.
pub const ALLOWED_UPDATES: &[&str] = &["message", "channel_post"];
