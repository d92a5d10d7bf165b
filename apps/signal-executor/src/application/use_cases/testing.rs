//! Scripted exchange fake for use case tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::application::ports::{
    ExchangeError, ExchangePort, LimitOrderRequest, MarketOrderRequest, OrderAck,
};
use crate::domain::shared::Ticker;
use crate::domain::sizing::InstrumentConstraints;

/// A call observed by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    LastPrice(String),
    Constraints(String),
    SetLeverage(String, u32),
    Market(MarketOrderRequest),
    Limit(LimitOrderRequest),
    TakeProfit(String, Decimal),
}

#[derive(Default)]
pub struct ScriptedExchange {
    prices: Mutex<HashMap<String, VecDeque<Result<Decimal, ExchangeError>>>>,
    constraints: HashMap<String, Result<InstrumentConstraints, ExchangeError>>,
    market_rejections: HashMap<String, ExchangeError>,
    limit_rejection: Option<ExchangeError>,
    take_profit_rejection: Option<ExchangeError>,
    leverage_error: Option<ExchangeError>,
    calls: Mutex<Vec<Call>>,
}

fn rejected(code: i64) -> ExchangeError {
    ExchangeError::Rejected {
        code,
        message: format!("scripted rejection {code}"),
    }
}

impl ScriptedExchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every price lookup for `symbol` returns `price`.
    pub fn with_price(self, symbol: &str, price: Decimal) -> Self {
        self.with_prices(symbol, vec![Ok(price)])
    }

    /// Price lookups for `symbol` return `results` in order; the last one repeats.
    pub fn with_prices(self, symbol: &str, results: Vec<Result<Decimal, ExchangeError>>) -> Self {
        self.prices
            .lock()
            .unwrap()
            .insert(symbol.to_uppercase(), results.into());
        self
    }

    pub fn with_price_error(self, symbol: &str) -> Self {
        self.with_prices(
            symbol,
            vec![Err(ExchangeError::Connection {
                message: "scripted outage".to_string(),
            })],
        )
    }

    pub fn with_constraints(mut self, symbol: &str, c: InstrumentConstraints) -> Self {
        self.constraints.insert(symbol.to_uppercase(), Ok(c));
        self
    }

    pub fn with_constraint_error(mut self, symbol: &str) -> Self {
        self.constraints.insert(symbol.to_uppercase(), Err(rejected(10_001)));
        self
    }

    pub fn reject_market(mut self, symbol: &str, code: i64) -> Self {
        self.market_rejections
            .insert(symbol.to_uppercase(), rejected(code));
        self
    }

    pub fn reject_limit(mut self, code: i64) -> Self {
        self.limit_rejection = Some(rejected(code));
        self
    }

    pub fn reject_take_profit(mut self, code: i64) -> Self {
        self.take_profit_rejection = Some(rejected(code));
        self
    }

    pub fn fail_leverage(mut self, code: i64) -> Self {
        self.leverage_error = Some(rejected(code));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn ack() -> OrderAck {
        OrderAck {
            order_id: "ord-1".to_string(),
            client_order_id: "link-1".to_string(),
        }
    }
}

#[async_trait]
impl ExchangePort for ScriptedExchange {
    async fn last_price(&self, symbol: &Ticker) -> Result<Decimal, ExchangeError> {
        self.record(Call::LastPrice(symbol.to_string()));
        let mut prices = self.prices.lock().unwrap();
        let Some(queue) = prices.get_mut(symbol.as_str()) else {
            return Err(ExchangeError::InstrumentNotFound {
                symbol: symbol.to_string(),
            });
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        }
    }

    async fn instrument_constraints(
        &self,
        symbol: &Ticker,
    ) -> Result<InstrumentConstraints, ExchangeError> {
        self.record(Call::Constraints(symbol.to_string()));
        self.constraints
            .get(symbol.as_str())
            .cloned()
            .unwrap_or_else(|| {
                Err(ExchangeError::InstrumentNotFound {
                    symbol: symbol.to_string(),
                })
            })
    }

    async fn set_leverage(&self, symbol: &Ticker, leverage: u32) -> Result<(), ExchangeError> {
        self.record(Call::SetLeverage(symbol.to_string(), leverage));
        self.leverage_error.clone().map_or(Ok(()), Err)
    }

    async fn place_market_order(
        &self,
        request: MarketOrderRequest,
    ) -> Result<OrderAck, ExchangeError> {
        let rejection = self.market_rejections.get(request.symbol.as_str()).cloned();
        self.record(Call::Market(request));
        rejection.map_or_else(|| Ok(Self::ack()), Err)
    }

    async fn place_limit_order(
        &self,
        request: LimitOrderRequest,
    ) -> Result<OrderAck, ExchangeError> {
        self.record(Call::Limit(request));
        self.limit_rejection.clone().map_or_else(|| Ok(Self::ack()), Err)
    }

    async fn attach_take_profit(
        &self,
        symbol: &Ticker,
        trigger_price: Decimal,
    ) -> Result<(), ExchangeError> {
        self.record(Call::TakeProfit(symbol.to_string(), trigger_price));
        self.take_profit_rejection.clone().map_or(Ok(()), Err)
    }
}
