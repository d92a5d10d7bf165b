//! Ticker value object for base-asset identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// A base-asset ticker extracted from a signal (e.g. "ETH", "BTC").
///
/// Tickers are stored uppercase. The exchange instrument is formed by
/// appending the quote asset: `ETH` + `USDT` = `ETHUSDT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Create a new Ticker.
    ///
    /// The ticker is normalized to uppercase.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().to_uppercase())
    }

    /// Get the ticker string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exchange instrument name for this ticker quoted in `quote`.
    #[must_use]
    pub fn instrument(&self, quote: &str) -> String {
        format!("{}{}", self.0, quote.to_uppercase())
    }

    /// Validate the ticker before it is sent to the exchange.
    ///
    /// # Errors
    ///
    /// Returns error if the ticker is empty or contains characters outside
    /// `[A-Z0-9_]`.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::InvalidValue {
                field: "ticker".to_string(),
                message: "Ticker cannot be empty".to_string(),
            });
        }

        if !self
            .0
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(DomainError::InvalidValue {
                field: "ticker".to_string(),
                message: "Ticker contains invalid characters".to_string(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
