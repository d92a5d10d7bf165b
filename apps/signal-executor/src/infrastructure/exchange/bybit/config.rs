//! Bybit adapter configuration.

use std::fmt;
use std::time::Duration;

use crate::domain::execution::Venue;

/// Environment for the Bybit API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BybitEnvironment {
    /// Demo trading (simulated balances on the production matching engine).
    Demo,
    /// Live trading (real money).
    Live,
}

impl BybitEnvironment {
    /// Get the base URL for the REST API.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Demo => "https://api-demo.bybit.com",
            Self::Live => "https://api.bybit.com",
        }
    }

    /// Check if this is live trading.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }
}

impl fmt::Display for BybitEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Demo => write!(f, "DEMO"),
            Self::Live => write!(f, "LIVE"),
        }
    }
}

/// Configuration for the Bybit exchange adapter.
#[derive(Clone)]
pub struct BybitConfig {
    /// API key.
    pub api_key: String,
    /// API secret.
    pub api_secret: String,
    /// Trading environment.
    pub environment: BybitEnvironment,
    /// Product category traded by this session.
    pub venue: Venue,
    /// Quote asset appended to tickers.
    pub quote_asset: String,
    /// Receive window sent with signed requests, in milliseconds.
    pub recv_window_ms: u64,
    /// HTTP request timeout.
    pub timeout: Duration,
    base_url_override: Option<String>,
}

impl BybitConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(
        api_key: String,
        api_secret: String,
        environment: BybitEnvironment,
        venue: Venue,
    ) -> Self {
        Self {
            api_key,
            api_secret,
            environment,
            venue,
            quote_asset: "USDT".to_string(),
            recv_window_ms: 5000,
            timeout: Duration::from_secs(10),
            base_url_override: None,
        }
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the receive window.
    #[must_use]
    pub const fn with_recv_window(mut self, recv_window_ms: u64) -> Self {
        self.recv_window_ms = recv_window_ms;
        self
    }

    /// Set the quote asset.
    #[must_use]
    pub fn with_quote_asset(mut self, quote_asset: impl Into<String>) -> Self {
        self.quote_asset = quote_asset.into().to_uppercase();
        self
    }

    /// Point the adapter at another host (local mocks).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Get the REST API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url_override
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }

    /// Check whether both key and secret are present.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

impl fmt::Debug for BybitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BybitConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("venue", &self.venue)
            .field("quote_asset", &self.quote_asset)
            .field("recv_window_ms", &self.recv_window_ms)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url())
            .finish()
    }
}
