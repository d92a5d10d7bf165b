//! Exchange Port (Driven Port)
//!
//! Interface for market data lookups and order placement on a single venue.
//!
//! A session is **not** safe for concurrent mutation: orders, leverage and
//! take-profits for one account must be issued from one task at a time. The
//! signal server enforces this with a single worker queue.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::execution::ExecutionError;
use crate::domain::shared::{OrderSide, Ticker};
use crate::domain::sizing::InstrumentConstraints;

/// Unit a market order is sized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSize {
    /// Quantity of the base asset.
    Base(Decimal),
    /// Amount of the quote asset to spend (spot buys and sells).
    Quote(Decimal),
}

impl OrderSize {
    /// The raw amount regardless of unit.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        match self {
            Self::Base(v) | Self::Quote(v) => *v,
        }
    }
}

/// Request to place a market order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrderRequest {
    /// Base-asset ticker.
    pub symbol: Ticker,
    /// Order side.
    pub side: OrderSide,
    /// Order size.
    pub size: OrderSize,
}

impl MarketOrderRequest {
    /// Market order sized in base units.
    #[must_use]
    pub const fn base(symbol: Ticker, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            symbol,
            side,
            size: OrderSize::Base(quantity),
        }
    }

    /// Market order sized in quote currency.
    #[must_use]
    pub const fn quote(symbol: Ticker, side: OrderSide, notional: Decimal) -> Self {
        Self {
            symbol,
            side,
            size: OrderSize::Quote(notional),
        }
    }
}

/// Request to place a resting good-till-cancel limit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrderRequest {
    /// Base-asset ticker.
    pub symbol: Ticker,
    /// Order side.
    pub side: OrderSide,
    /// Quantity in base units.
    pub quantity: Decimal,
    /// Limit price.
    pub price: Decimal,
}

impl LimitOrderRequest {
    /// Create a GTC limit order request.
    #[must_use]
    pub const fn gtc(symbol: Ticker, side: OrderSide, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol,
            side,
            quantity,
            price,
        }
    }
}

/// Acknowledgment from the venue after order placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAck {
    /// Venue-assigned order ID.
    pub order_id: String,
    /// Client link ID echoed back.
    pub client_order_id: String,
}

/// Exchange port error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    /// The venue could not be reached or timed out.
    #[error("Exchange connection error: {message}")]
    Connection {
        /// Error details.
        message: String,
    },

    /// The venue answered with a non-zero return code.
    #[error("Exchange rejected request [{code}]: {message}")]
    Rejected {
        /// Venue return code.
        code: i64,
        /// Venue message.
        message: String,
    },

    /// The venue does not list the instrument.
    #[error("Instrument not found: {symbol}")]
    InstrumentNotFound {
        /// Instrument name.
        symbol: String,
    },

    /// The request cannot be expressed on this venue.
    #[error("Invalid exchange request: {message}")]
    InvalidRequest {
        /// Error details.
        message: String,
    },

    /// Response could not be interpreted.
    #[error("Invalid exchange response: {message}")]
    InvalidResponse {
        /// Error details.
        message: String,
    },

    /// No credentials or the session could not be authenticated.
    #[error("Exchange authentication error: {message}")]
    Unauthenticated {
        /// Error details.
        message: String,
    },
}

impl ExchangeError {
    /// Venue return code, if the venue answered.
    #[must_use]
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::Rejected { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Express a failed order call as an order rejection.
    #[must_use]
    pub fn into_order_rejection(self) -> ExecutionError {
        let code = self.code();
        let message = match self {
            Self::Rejected { message, .. } => message,
            other => other.to_string(),
        };
        ExecutionError::OrderRejected { code, message }
    }
}

/// Port for one authenticated exchange session.
#[async_trait]
pub trait ExchangePort: Send + Sync {
    /// Last traded price of the instrument for `symbol`.
    async fn last_price(&self, symbol: &Ticker) -> Result<Decimal, ExchangeError>;

    /// Current quantization constraints for `symbol`.
    async fn instrument_constraints(
        &self,
        symbol: &Ticker,
    ) -> Result<InstrumentConstraints, ExchangeError>;

    /// Set the leverage multiplier for both sides of `symbol`.
    async fn set_leverage(&self, symbol: &Ticker, leverage: u32) -> Result<(), ExchangeError>;

    /// Place a market order.
    async fn place_market_order(&self, request: MarketOrderRequest)
    -> Result<OrderAck, ExchangeError>;

    /// Place a resting limit order.
    async fn place_limit_order(&self, request: LimitOrderRequest)
    -> Result<OrderAck, ExchangeError>;

    /// Attach a take-profit to the open position, triggered on last price.
    async fn attach_take_profit(
        &self,
        symbol: &Ticker,
        trigger_price: Decimal,
    ) -> Result<(), ExchangeError>;
}

/// Opens exchange sessions, one per signal.
pub trait SessionFactory: Send + Sync {
    /// Session type produced by this factory.
    type Session: ExchangePort;

    /// Open a session.
    ///
    /// # Errors
    ///
    /// Returns error if the session cannot be created (e.g. missing
    /// credentials).
    fn open(&self) -> Result<Self::Session, ExchangeError>;
}
