//! Gateway Configuration Settings
//!
//! Configuration types for the chat gateway, loaded from environment variables.

use std::time::Duration;

use crate::domain::routing::RouteTargets;
use crate::infrastructure::telegram::{DEFAULT_API_URL, DEFAULT_POLL_TIMEOUT, TelegramConfig};

/// Complete gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bot API access.
    pub telegram: TelegramConfig,
    /// Executor websocket URLs.
    pub targets: RouteTargets,
}

impl GatewayConfig {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `TELEGRAM_BOT_TOKEN` (required)
    /// - `TELEGRAM_API_URL` (default `https://api.telegram.org`)
    /// - `TELEGRAM_POLL_TIMEOUT_SECS` (default 30)
    /// - `SPOT_WS_URL` (default `ws://localhost:8765`)
    /// - `FUTURES_WS_URL` (default `ws://localhost:8766`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup("TELEGRAM_BOT_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("TELEGRAM_BOT_TOKEN".to_string()))?;
        let bot_token = bot_token.trim();
        if bot_token.is_empty() {
            return Err(ConfigError::EmptyValue("TELEGRAM_BOT_TOKEN".to_string()));
        }

        let api_url = non_empty(&lookup, "TELEGRAM_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let poll_timeout = parse_env_duration_secs(&lookup, "TELEGRAM_POLL_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_POLL_TIMEOUT);

        let defaults = RouteTargets::default();
        let targets = RouteTargets::new(
            non_empty(&lookup, "SPOT_WS_URL").unwrap_or(defaults.spot_url),
            non_empty(&lookup, "FUTURES_WS_URL").unwrap_or(defaults.futures_url),
        );

        Ok(Self {
            telegram: TelegramConfig::new(bot_token)
                .with_api_url(api_url)
                .with_poll_timeout(poll_timeout),
            targets,
        })
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Required environment variable is set but empty.
    #[error("Environment variable is empty: {0}")]
    EmptyValue(String),

    /// Environment variable could not be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Raw value.
        value: String,
    },
}

fn non_empty<L: Fn(&str) -> Option<String>>(lookup: &L, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env_duration_secs<L: Fn(&str) -> Option<String>>(
    lookup: &L,
    key: &str,
) -> Result<Option<Duration>, ConfigError> {
    non_empty(lookup, key)
        .map(|raw| {
            raw.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: raw,
                })
        })
        .transpose()
}
