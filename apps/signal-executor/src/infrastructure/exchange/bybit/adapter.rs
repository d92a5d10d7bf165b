//! Bybit exchange adapter implementing ExchangePort.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::application::ports::{
    ExchangeError, ExchangePort, LimitOrderRequest, MarketOrderRequest, OrderAck, OrderSize,
    SessionFactory,
};
use crate::domain::execution::Venue;
use crate::domain::shared::Ticker;
use crate::domain::sizing::InstrumentConstraints;

use super::api_types::{
    CreateOrderRequest, CreateOrderResult, InstrumentList, SetLeverageRequest, TickerList,
    TradingStopRequest, format_decimal, parse_decimal,
};
use super::config::{BybitConfig, BybitEnvironment};
use super::error::{BybitError, LEVERAGE_NOT_MODIFIED};
use super::http_client::BybitHttpClient;

/// Bybit V5 exchange adapter for one product category.
#[derive(Debug, Clone)]
pub struct BybitExchangeAdapter {
    client: BybitHttpClient,
    environment: BybitEnvironment,
    venue: Venue,
    quote_asset: String,
}

impl BybitExchangeAdapter {
    /// Create a new adapter.
    pub fn new(config: &BybitConfig) -> Result<Self, BybitError> {
        let client = BybitHttpClient::new(config)?;
        Ok(Self {
            client,
            environment: config.environment,
            venue: config.venue,
            quote_asset: config.quote_asset.clone(),
        })
    }

    /// Check if we're in live trading mode.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.environment.is_live()
    }

    fn instrument(&self, symbol: &Ticker) -> Result<String, ExchangeError> {
        symbol
            .validate()
            .map_err(|e| ExchangeError::InvalidRequest {
                message: e.to_string(),
            })?;
        Ok(symbol.instrument(&self.quote_asset))
    }

    fn link_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    async fn create_order(&self, body: CreateOrderRequest) -> Result<OrderAck, ExchangeError> {
        if self.is_live() {
            tracing::warn!(
                symbol = %body.symbol,
                side = body.side,
                "Submitting LIVE order - this will execute real trades"
            );
        }

        tracing::info!(
            category = body.category,
            symbol = %body.symbol,
            side = body.side,
            order_type = body.order_type,
            qty = %body.qty,
            price = ?body.price,
            order_link_id = %body.order_link_id,
            "Submitting order to Bybit"
        );

        let result: CreateOrderResult = self
            .client
            .post("/v5/order/create", &body)
            .await
            .map_err(ExchangeError::from)?;

        Ok(OrderAck {
            order_id: result.order_id,
            client_order_id: if result.order_link_id.is_empty() {
                body.order_link_id
            } else {
                result.order_link_id
            },
        })
    }
}

#[async_trait]
impl ExchangePort for BybitExchangeAdapter {
    async fn last_price(&self, symbol: &Ticker) -> Result<Decimal, ExchangeError> {
        let instrument = self.instrument(symbol)?;
        let tickers: TickerList = self
            .client
            .get(
                "/v5/market/tickers",
                &[("category", self.venue.category()), ("symbol", instrument.as_str())],
            )
            .await?;

        let entry = tickers
            .list
            .iter()
            .find(|t| t.symbol == instrument)
            .ok_or(BybitError::EmptyResult {
            what: "ticker",
            symbol: instrument,
        })?;
        Ok(parse_decimal("lastPrice", &entry.last_price)?)
    }

    async fn instrument_constraints(
        &self,
        symbol: &Ticker,
    ) -> Result<InstrumentConstraints, ExchangeError> {
        let instrument = self.instrument(symbol)?;
        let instruments: InstrumentList = self
            .client
            .get(
                "/v5/market/instruments-info",
                &[("category", self.venue.category()), ("symbol", instrument.as_str())],
            )
            .await?;

        let entry = instruments
            .list
            .iter()
            .find(|i| i.symbol == instrument)
            .ok_or(BybitError::EmptyResult {
            what: "instrument info",
            symbol: instrument,
        })?;
        Ok(entry.to_constraints(self.venue)?)
    }

    async fn set_leverage(&self, symbol: &Ticker, leverage: u32) -> Result<(), ExchangeError> {
        let body = SetLeverageRequest {
            category: self.venue.category(),
            symbol: self.instrument(symbol)?,
            buy_leverage: leverage.to_string(),
            sell_leverage: leverage.to_string(),
        };

        match self
            .client
            .post::<serde_json::Value, _>("/v5/position/set-leverage", &body)
            .await
        {
            Ok(_) => {
                tracing::info!(symbol = %body.symbol, leverage, "Leverage set");
                Ok(())
            }
            Err(BybitError::Api { code, .. }) if code == LEVERAGE_NOT_MODIFIED => {
                tracing::debug!(symbol = %body.symbol, leverage, "Leverage already set");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn place_market_order(
        &self,
        request: MarketOrderRequest,
    ) -> Result<OrderAck, ExchangeError> {
        let market_unit = match (self.venue, request.size) {
            (Venue::Spot, OrderSize::Quote(_)) => Some("quoteCoin"),
            (Venue::Spot, OrderSize::Base(_)) => Some("baseCoin"),
            (Venue::Futures, OrderSize::Base(_)) => None,
            (Venue::Futures, OrderSize::Quote(_)) => {
                return Err(ExchangeError::InvalidRequest {
                    message: "linear market orders must be sized in base units".to_string(),
                });
            }
        };

        let body = CreateOrderRequest {
            category: self.venue.category(),
            symbol: self.instrument(&request.symbol)?,
            side: request.side.as_exchange_str(),
            order_type: "Market",
            qty: format_decimal(request.size.amount()),
            market_unit,
            price: None,
            time_in_force: None,
            position_idx: self.venue.uses_leverage().then_some(0),
            order_link_id: Self::link_id(),
        };
        self.create_order(body).await
    }

    async fn place_limit_order(
        &self,
        request: LimitOrderRequest,
    ) -> Result<OrderAck, ExchangeError> {
        let body = CreateOrderRequest {
            category: self.venue.category(),
            symbol: self.instrument(&request.symbol)?,
            side: request.side.as_exchange_str(),
            order_type: "Limit",
            qty: format_decimal(request.quantity),
            market_unit: None,
            price: Some(format_decimal(request.price)),
            time_in_force: Some("GTC"),
            position_idx: self.venue.uses_leverage().then_some(0),
            order_link_id: Self::link_id(),
        };
        self.create_order(body).await
    }

    async fn attach_take_profit(
        &self,
        symbol: &Ticker,
        trigger_price: Decimal,
    ) -> Result<(), ExchangeError> {
        let body = TradingStopRequest {
            category: self.venue.category(),
            symbol: self.instrument(symbol)?,
            take_profit: format_decimal(trigger_price),
            tp_trigger_by: "LastPrice",
            tpsl_mode: "Full",
            position_idx: 0,
        };

        self.client
            .post::<serde_json::Value, _>("/v5/position/trading-stop", &body)
            .await?;
        Ok(())
    }
}

/// Opens a fresh authenticated Bybit session per signal.
#[derive(Debug, Clone)]
pub struct BybitSessionFactory {
    config: BybitConfig,
}

impl BybitSessionFactory {
    /// Create a factory.
    #[must_use]
    pub const fn new(config: BybitConfig) -> Self {
        Self { config }
    }
}

impl SessionFactory for BybitSessionFactory {
    type Session = BybitExchangeAdapter;

    fn open(&self) -> Result<Self::Session, ExchangeError> {
        BybitExchangeAdapter::new(&self.config).map_err(ExchangeError::from)
    }
}
