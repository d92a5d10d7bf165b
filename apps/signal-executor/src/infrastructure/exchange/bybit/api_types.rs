//! Bybit V5 API request and response types.
//!
//! These types map directly to Bybit's REST API format. Numbers travel as
//! strings in both directions.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::execution::Venue;
use crate::domain::sizing::InstrumentConstraints;

use super::error::BybitError;

// ============================================================================
// Envelope
// ============================================================================

/// Common response envelope. `result` is decoded only when `retCode == 0`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BybitEnvelope {
    /// Return code, 0 on success.
    pub ret_code: i64,
    /// Return message.
    #[serde(default)]
    pub ret_msg: String,
    /// Endpoint-specific payload.
    #[serde(default)]
    pub result: serde_json::Value,
}

// ============================================================================
// Market Data Types
// ============================================================================

/// `GET /v5/market/tickers` result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TickerList {
    /// Matching tickers.
    #[serde(default)]
    pub list: Vec<TickerEntry>,
}

/// One ticker entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerEntry {
    /// Instrument name.
    pub symbol: String,
    /// Last traded price.
    pub last_price: String,
}

/// `GET /v5/market/instruments-info` result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstrumentList {
    /// Matching instruments.
    #[serde(default)]
    pub list: Vec<InstrumentEntry>,
}

/// One instrument entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentEntry {
    /// Instrument name.
    pub symbol: String,
    /// Quantity rules.
    #[serde(default)]
    pub lot_size_filter: LotSizeFilter,
    /// Price rules.
    #[serde(default)]
    pub price_filter: PriceFilter,
}

/// Quantity rules. Linear instruments report `qtyStep`, spot reports
/// `basePrecision`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotSizeFilter {
    /// Minimum order quantity.
    pub min_order_qty: Option<String>,
    /// Quantity step (linear).
    pub qty_step: Option<String>,
    /// Base asset precision (spot).
    pub base_precision: Option<String>,
}

/// Price rules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFilter {
    /// Price tick.
    pub tick_size: Option<String>,
}

/// Fallback (min qty, step) when the venue omits a lot size field.
fn default_lot(venue: Venue) -> (Decimal, Decimal) {
    match venue {
        Venue::Futures => (dec!(0.001), dec!(0.001)),
        Venue::Spot => (dec!(0.0001), dec!(0.0001)),
    }
}

impl InstrumentEntry {
    /// Convert into domain constraints.
    pub fn to_constraints(&self, venue: Venue) -> Result<InstrumentConstraints, BybitError> {
        let (default_min, default_step) = default_lot(venue);
        let lot = &self.lot_size_filter;

        let min_qty = match &lot.min_order_qty {
            Some(v) => parse_decimal("minOrderQty", v)?,
            None => default_min,
        };
        let step = match lot.qty_step.as_ref().or(lot.base_precision.as_ref()) {
            Some(v) => parse_decimal("qtyStep", v)?,
            None => default_step,
        };

        let constraints = InstrumentConstraints::new(min_qty, step);
        match &self.price_filter.tick_size {
            Some(v) => Ok(constraints.with_tick_size(parse_decimal("tickSize", v)?)),
            None => Ok(constraints),
        }
    }
}

// ============================================================================
// Trade Request Types
// ============================================================================

/// `POST /v5/position/set-leverage` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLeverageRequest {
    /// Product category.
    pub category: &'static str,
    /// Instrument name.
    pub symbol: String,
    /// Leverage for longs.
    pub buy_leverage: String,
    /// Leverage for shorts.
    pub sell_leverage: String,
}

/// `POST /v5/order/create` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Product category.
    pub category: &'static str,
    /// Instrument name.
    pub symbol: String,
    /// "Buy" or "Sell".
    pub side: &'static str,
    /// "Market" or "Limit".
    pub order_type: &'static str,
    /// Order quantity.
    pub qty: String,
    /// Unit of `qty` for spot market orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_unit: Option<&'static str>,
    /// Limit price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Time in force.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<&'static str>,
    /// Position index (0 = one-way mode), linear only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_idx: Option<u8>,
    /// Client order link ID.
    pub order_link_id: String,
}

/// `POST /v5/order/create` result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResult {
    /// Venue order ID.
    #[serde(default)]
    pub order_id: String,
    /// Client order link ID.
    #[serde(default)]
    pub order_link_id: String,
}

/// `POST /v5/position/trading-stop` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingStopRequest {
    /// Product category.
    pub category: &'static str,
    /// Instrument name.
    pub symbol: String,
    /// Take-profit trigger price.
    pub take_profit: String,
    /// Trigger price type.
    pub tp_trigger_by: &'static str,
    /// "Full" closes the whole position.
    pub tpsl_mode: &'static str,
    /// Position index (0 = one-way mode).
    pub position_idx: u8,
}

// ============================================================================
// Helpers
// ============================================================================

/// Parse a numeric string field, accepting scientific notation.
pub fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, BybitError> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| BybitError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Render a decimal the way the venue expects: plain, no trailing zeros.
#[must_use]
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}
