//! Executor Configuration Settings
//!
//! Configuration types for the signal executor, loaded from environment
//! variables. Unparseable numbers fall back to their defaults; an unknown
//! venue or a non-positive trade amount is rejected.

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::application::use_cases::ExecutionSettings;
use crate::domain::execution::Venue;
use crate::infrastructure::exchange::{BybitConfig, BybitEnvironment};

/// Bybit API credentials.
#[derive(Clone, Default)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Create new credentials.
    #[must_use]
    pub const fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
        }
    }

    /// Get the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the API secret.
    #[must_use]
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }

    /// Both halves are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Per-trade parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeSettings {
    /// Fixed notional per symbol, in quote currency.
    pub notional: Decimal,
    /// Futures leverage multiplier.
    pub leverage: u32,
    /// Take-profit offset as a fraction of the entry price.
    pub take_profit_pct: Decimal,
    /// Quote asset appended to tickers.
    pub quote_asset: String,
}

impl Default for TradeSettings {
    fn default() -> Self {
        Self {
            notional: dec!(5),
            leverage: 5,
            take_profit_pct: dec!(0.15),
            quote_asset: "USDT".to_string(),
        }
    }
}

/// Exchange HTTP settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeSettings {
    /// Receive window for signed requests, in milliseconds.
    pub recv_window_ms: u64,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Base URL override (tests, proxies).
    pub base_url: Option<String>,
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self {
            recv_window_ms: 5000,
            timeout: Duration::from_secs(10),
            base_url: None,
        }
    }
}

/// Signal server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Interface the websocket server binds.
    pub host: String,
    /// Websocket server port.
    pub port: u16,
    /// Capacity of the inbound signal queue.
    pub queue_capacity: usize,
    /// Prometheus exporter port (0 disables).
    pub metrics_port: u16,
}

impl ServerSettings {
    /// Defaults for a venue: spot listens on 8765, futures on 8766.
    #[must_use]
    pub fn for_venue(venue: Venue) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: venue.default_port(),
            queue_capacity: 64,
            metrics_port: 0,
        }
    }

    /// `host:port` bind address.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Complete executor configuration.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Venue served by this process.
    pub venue: Venue,
    /// Bybit environment.
    pub environment: BybitEnvironment,
    /// API credentials, possibly empty.
    pub credentials: Credentials,
    /// Trade parameters.
    pub trade: TradeSettings,
    /// Exchange HTTP settings.
    pub exchange: ExchangeSettings,
    /// Server settings.
    pub server: ServerSettings,
}

impl ExecutorConfig {
    /// Load configuration from the process environment.
    ///
    /// Missing credentials are not an error: every signal then fails with a
    /// transport error until they are provided.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let venue = match non_empty(&lookup, "SIGNAL_VENUE") {
            Some(raw) => raw.parse::<Venue>().map_err(|_| ConfigError::InvalidValue {
                key: "SIGNAL_VENUE".to_string(),
                value: raw,
            })?,
            None => Venue::Spot,
        };

        let environment = if parse_env_bool(&lookup, "BYBIT_DEMO", true) {
            BybitEnvironment::Demo
        } else {
            BybitEnvironment::Live
        };

        let credentials = Credentials::new(
            non_empty(&lookup, "BYBIT_API_KEY").unwrap_or_default(),
            non_empty(&lookup, "BYBIT_API_SECRET").unwrap_or_default(),
        );

        let trade_defaults = TradeSettings::default();
        let trade = TradeSettings {
            notional: parse_env(&lookup, "TRADE_AMOUNT_USD", trade_defaults.notional),
            leverage: parse_env(&lookup, "LEVERAGE", trade_defaults.leverage),
            take_profit_pct: parse_env(&lookup, "TAKE_PROFIT_PCT", trade_defaults.take_profit_pct),
            quote_asset: non_empty(&lookup, "QUOTE_ASSET")
                .map_or(trade_defaults.quote_asset, |q| q.to_uppercase()),
        };
        require_positive("TRADE_AMOUNT_USD", trade.notional)?;
        require_positive("TAKE_PROFIT_PCT", trade.take_profit_pct)?;
        // A short take-profit at 100% or more would be priced at or below zero.
        if trade.take_profit_pct >= Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                key: "TAKE_PROFIT_PCT".to_string(),
                value: trade.take_profit_pct.to_string(),
            });
        }
        if trade.leverage == 0 {
            return Err(ConfigError::InvalidValue {
                key: "LEVERAGE".to_string(),
                value: "0".to_string(),
            });
        }

        let exchange_defaults = ExchangeSettings::default();
        let exchange = ExchangeSettings {
            recv_window_ms: parse_env(
                &lookup,
                "BYBIT_RECV_WINDOW_MS",
                exchange_defaults.recv_window_ms,
            ),
            timeout: parse_env_duration_secs(
                &lookup,
                "BYBIT_TIMEOUT_SECS",
                exchange_defaults.timeout,
            ),
            base_url: non_empty(&lookup, "BYBIT_BASE_URL"),
        };

        let server_defaults = ServerSettings::for_venue(venue);
        let server = ServerSettings {
            host: non_empty(&lookup, "SIGNAL_WS_HOST").unwrap_or(server_defaults.host),
            port: parse_env(&lookup, "SIGNAL_WS_PORT", server_defaults.port),
            queue_capacity: parse_env(
                &lookup,
                "SIGNAL_QUEUE_CAPACITY",
                server_defaults.queue_capacity,
            )
            .max(1),
            metrics_port: parse_env(&lookup, "SIGNAL_METRICS_PORT", server_defaults.metrics_port),
        };

        Ok(Self {
            venue,
            environment,
            credentials,
            trade,
            exchange,
            server,
        })
    }

    /// Adapter configuration for this venue.
    #[must_use]
    pub fn bybit_config(&self) -> BybitConfig {
        let config = BybitConfig::new(
            self.credentials.api_key().to_string(),
            self.credentials.api_secret().to_string(),
            self.environment,
            self.venue,
        )
        .with_quote_asset(self.trade.quote_asset.clone())
        .with_recv_window(self.exchange.recv_window_ms)
        .with_timeout(self.exchange.timeout);

        match &self.exchange.base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        }
    }

    /// Trade parameters for the executor.
    #[must_use]
    pub const fn execution_settings(&self) -> ExecutionSettings {
        ExecutionSettings {
            notional: self.trade.notional,
            leverage: self.trade.leverage,
            take_profit_pct: self.trade.take_profit_pct,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Variable is set but cannot be used.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Offending value.
        value: String,
    },
}

fn non_empty<L: Fn(&str) -> Option<String>>(lookup: &L, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<L, T>(lookup: &L, key: &str, default: T) -> T
where
    L: Fn(&str) -> Option<String>,
    T: FromStr,
{
    non_empty(lookup, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_env_bool<L: Fn(&str) -> Option<String>>(lookup: &L, key: &str, default: bool) -> bool {
    non_empty(lookup, key).map_or(default, |v| {
        !matches!(v.to_lowercase().as_str(), "false" | "0" | "no" | "off")
    })
}

fn parse_env_duration_secs<L: Fn(&str) -> Option<String>>(
    lookup: &L,
    key: &str,
    default: Duration,
) -> Duration {
    non_empty(lookup, key)
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(default, Duration::from_secs)
}

fn require_positive(key: &str, value: Decimal) -> Result<(), ConfigError> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}
