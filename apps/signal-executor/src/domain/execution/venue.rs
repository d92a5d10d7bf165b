//! Execution venue.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::shared::DomainError;

/// Which market a backend process trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    /// Spot market, quote-sized market entries and resting limit take-profits.
    Spot,
    /// USDT-margined perpetual futures with leverage and position take-profits.
    Futures,
}

impl Venue {
    /// Exchange category string.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Spot => "spot",
            Self::Futures => "linear",
        }
    }

    /// Default local websocket port for this venue's signal server.
    #[must_use]
    pub const fn default_port(&self) -> u16 {
        match self {
            Self::Spot => 8765,
            Self::Futures => 8766,
        }
    }

    /// Whether entries on this venue carry leverage.
    #[must_use]
    pub const fn uses_leverage(&self) -> bool {
        matches!(self, Self::Futures)
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spot => write!(f, "SPOT"),
            Self::Futures => write!(f, "FUTURES"),
        }
    }
}

impl FromStr for Venue {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spot" => Ok(Self::Spot),
            "futures" | "linear" | "perp" => Ok(Self::Futures),
            other => Err(DomainError::InvalidValue {
                field: "venue".to_string(),
                message: format!("unknown venue '{other}', expected spot or futures"),
            }),
        }
    }
}
