//! Telegram-specific error types.

use thiserror::Error;

use crate::application::ports::ChatError;

/// Errors from the Telegram client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TelegramError {
    /// Non-success HTTP status without a parseable envelope.
    #[error("HTTP error {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Envelope with `ok: false`.
    #[error("API error {code}: {description}")]
    Api {
        /// Bot API error code.
        code: i64,
        /// Bot API description.
        description: String,
    },

    /// Network error.
    #[error("Network error: {0}")]
    Network(String),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),
}

impl From<TelegramError> for ChatError {
    fn from(err: TelegramError) -> Self {
        match err {
            TelegramError::Network(message) => Self::Unreachable { message },
            TelegramError::Http { status, body } => Self::Rejected {
                code: i64::from(status),
                description: body,
            },
            TelegramError::Api { code, description } => Self::Rejected { code, description },
            TelegramError::JsonParse(message) => Self::InvalidResponse { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_keeps_code() {
        let err: ChatError = TelegramError::Api {
            code: 401,
            description: "Unauthorized".to_string(),
        }
        .into();
        assert_eq!(
            err,
            ChatError::Rejected {
                code: 401,
                description: "Unauthorized".to_string(),
            }
        );
    }

    #[test]
    fn network_error_is_unreachable() {
        let err: ChatError = TelegramError::Network("timed out".to_string()).into();
        assert!(matches!(err, ChatError::Unreachable { .. }));
    }
}
