//! HTTP client for the Telegram Bot API.
//!
//! Every method is a JSON POST to `{api_url}/bot{token}/{method}`. The URL
//! contains the token and is never logged.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::config::TelegramConfig;
use super::error::TelegramError;
use super::types::{ALLOWED_UPDATES, ApiResponse, GetUpdatesRequest, SendMessageRequest, Update};
use crate::application::ports::{ChatError, ChatPort};
use crate::domain::chat::ChatMessage;
use crate::domain::routing::ChatId;

/// Slack on top of the long-poll timeout before the HTTP request gives up.
const REQUEST_SLACK: Duration = Duration::from_secs(10);

/// Telegram Bot API client.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
    poll_timeout: Duration,
}

impl TelegramClient {
    /// Create a client from config.
    pub fn new(config: &TelegramConfig) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(config.poll_timeout + REQUEST_SLACK)
            .build()
            .map_err(|e| TelegramError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: format!(
                "{}/bot{}",
                config.api_url.trim_end_matches('/'),
                config.bot_token
            ),
            poll_timeout: config.poll_timeout,
        })
    }

    /// Fetch updates starting at `offset`, waiting up to `timeout`.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        let body = GetUpdatesRequest {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call("getUpdates", &body).await
    }

    /// Send a plain text message.
    pub async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), TelegramError> {
        let _: serde_json::Value = self
            .call("sendMessage", &SendMessageRequest { chat_id, text })
            .await?;
        Ok(())
    }

    async fn call<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, TelegramError> {
        let response = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| TelegramError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TelegramError::Network(e.to_string()))?;

        // Bot API errors come back as 4xx with an `ok: false` envelope.
        let envelope: ApiResponse<T> = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                tracing::warn!(method, status = status.as_u16(), "Telegram HTTP error");
                return Err(TelegramError::Http {
                    status: status.as_u16(),
                    body: text,
                });
            }
            Err(e) => return Err(TelegramError::JsonParse(e.to_string())),
        };

        if !envelope.ok {
            let code = envelope.error_code.unwrap_or_else(|| i64::from(status.as_u16()));
            let description = envelope.description.unwrap_or_default();
            tracing::debug!(method, code, description = %description, "Telegram API error");
            return Err(TelegramError::Api { code, description });
        }

        envelope
            .result
            .ok_or_else(|| TelegramError::JsonParse(format!("{method}: missing result")))
    }
}

#[async_trait]
impl ChatPort for TelegramClient {
    async fn poll(&self, offset: Option<i64>) -> Result<Vec<ChatMessage>, ChatError> {
        let updates = self.get_updates(offset, self.poll_timeout).await?;
        Ok(updates
            .into_iter()
            .filter_map(Update::into_chat_message)
            .collect())
    }

    async fn skip_pending(&self) -> Result<Option<i64>, ChatError> {
        let updates = self.get_updates(Some(-1), Duration::ZERO).await?;
        let next = updates.last().map(|u| u.update_id + 1);
        if let Some(offset) = next {
            tracing::info!(offset, "Dropped pending updates");
        }
        Ok(next)
    }

    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), ChatError> {
        Ok(self.send_text(chat_id, text).await?)
    }
}
