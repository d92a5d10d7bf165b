//! Shared fakes for executor integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use signal_executor::application::ports::{
    ExchangeError, ExchangePort, LimitOrderRequest, MarketOrderRequest, OrderAck, SessionFactory,
};
use signal_executor::{InstrumentConstraints, Ticker};

/// Records every call as a short string such as `market:ETH:Buy`.
#[derive(Default)]
pub struct RecordingExchange {
    prices: HashMap<String, Decimal>,
    constraints: HashMap<String, InstrumentConstraints>,
    rejected_markets: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl RecordingExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn price(mut self, symbol: &str, price: Decimal) -> Self {
        self.prices.insert(symbol.to_string(), price);
        self
    }

    pub fn constraints(mut self, symbol: &str, c: InstrumentConstraints) -> Self {
        self.constraints.insert(symbol.to_string(), c);
        self
    }

    pub fn reject_market(mut self, symbol: &str) -> Self {
        self.rejected_markets.insert(symbol.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn ack() -> OrderAck {
        OrderAck {
            order_id: "1".to_string(),
            client_order_id: "link".to_string(),
        }
    }
}

#[async_trait]
impl ExchangePort for RecordingExchange {
    async fn last_price(&self, symbol: &Ticker) -> Result<Decimal, ExchangeError> {
        self.record(format!("price:{symbol}"));
        self.prices
            .get(symbol.as_str())
            .copied()
            .ok_or_else(|| ExchangeError::Connection {
                message: format!("no price for {symbol}"),
            })
    }

    async fn instrument_constraints(
        &self,
        symbol: &Ticker,
    ) -> Result<InstrumentConstraints, ExchangeError> {
        self.record(format!("constraints:{symbol}"));
        self.constraints
            .get(symbol.as_str())
            .cloned()
            .ok_or_else(|| ExchangeError::InstrumentNotFound {
                symbol: symbol.to_string(),
            })
    }

    async fn set_leverage(&self, symbol: &Ticker, leverage: u32) -> Result<(), ExchangeError> {
        self.record(format!("leverage:{symbol}:{leverage}"));
        Ok(())
    }

    async fn place_market_order(
        &self,
        request: MarketOrderRequest,
    ) -> Result<OrderAck, ExchangeError> {
        self.record(format!(
            "market:{}:{}",
            request.symbol,
            request.side.as_exchange_str()
        ));
        if self.rejected_markets.contains(request.symbol.as_str()) {
            return Err(ExchangeError::Rejected {
                code: 170_131,
                message: "Insufficient balance.".to_string(),
            });
        }
        Ok(Self::ack())
    }

    async fn place_limit_order(
        &self,
        request: LimitOrderRequest,
    ) -> Result<OrderAck, ExchangeError> {
        self.record(format!(
            "limit:{}:{}:{}@{}",
            request.symbol,
            request.side.as_exchange_str(),
            request.quantity,
            request.price
        ));
        Ok(Self::ack())
    }

    async fn attach_take_profit(
        &self,
        symbol: &Ticker,
        trigger_price: Decimal,
    ) -> Result<(), ExchangeError> {
        self.record(format!("tp:{symbol}:{trigger_price}"));
        Ok(())
    }
}

/// Session handle sharing one recording exchange across signals.
pub struct SharedSession(pub Arc<RecordingExchange>);

#[async_trait]
impl ExchangePort for SharedSession {
    async fn last_price(&self, symbol: &Ticker) -> Result<Decimal, ExchangeError> {
        self.0.last_price(symbol).await
    }

    async fn instrument_constraints(
        &self,
        symbol: &Ticker,
    ) -> Result<InstrumentConstraints, ExchangeError> {
        self.0.instrument_constraints(symbol).await
    }

    async fn set_leverage(&self, symbol: &Ticker, leverage: u32) -> Result<(), ExchangeError> {
        self.0.set_leverage(symbol, leverage).await
    }

    async fn place_market_order(
        &self,
        request: MarketOrderRequest,
    ) -> Result<OrderAck, ExchangeError> {
        self.0.place_market_order(request).await
    }

    async fn place_limit_order(
        &self,
        request: LimitOrderRequest,
    ) -> Result<OrderAck, ExchangeError> {
        self.0.place_limit_order(request).await
    }

    async fn attach_take_profit(
        &self,
        symbol: &Ticker,
        trigger_price: Decimal,
    ) -> Result<(), ExchangeError> {
        self.0.attach_take_profit(symbol, trigger_price).await
    }
}

/// Factory handing out [`SharedSession`]s, or failing every open.
pub struct RecordingFactory {
    pub exchange: Arc<RecordingExchange>,
    pub unavailable: bool,
}

impl RecordingFactory {
    pub fn new(exchange: RecordingExchange) -> Self {
        Self {
            exchange: Arc::new(exchange),
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            exchange: Arc::new(RecordingExchange::new()),
            unavailable: true,
        }
    }
}

impl SessionFactory for RecordingFactory {
    type Session = SharedSession;

    fn open(&self) -> Result<Self::Session, ExchangeError> {
        if self.unavailable {
            return Err(ExchangeError::Unauthenticated {
                message: "no credentials".to_string(),
            });
        }
        Ok(SharedSession(Arc::clone(&self.exchange)))
    }
}
