//! Futures Order Sequencer
//!
//! Per symbol: last price, sizing against instrument constraints, leverage,
//! market entry in base units, then a take-profit trading stop on the
//! position. Failures end only the current symbol.

use rust_decimal::Decimal;

use crate::application::ports::{ExchangePort, MarketOrderRequest};
use crate::domain::execution::{
    ExecutionError, SymbolOutcome, SymbolStage, TakeProfitOutcome, TradeIntent, Venue,
};
use crate::domain::sizing::{QuantitySizer, TakeProfitPolicy};

use super::pipeline::{advance, fetch_price};

/// Sequencer for linear perpetual futures.
#[derive(Debug, Clone, Copy)]
pub struct FuturesSequencer {
    take_profit: TakeProfitPolicy,
}

impl FuturesSequencer {
    /// Create a sequencer with the given take-profit policy.
    #[must_use]
    pub const fn new(take_profit: TakeProfitPolicy) -> Self {
        Self { take_profit }
    }

    /// Run the pipeline for one symbol.
    pub async fn execute<E>(&self, exchange: &E, intent: &TradeIntent) -> SymbolOutcome
    where
        E: ExchangePort + ?Sized,
    {
        let symbol = &intent.symbol;
        let label = intent.direction.label_for(Venue::Futures);
        let mut outcome = SymbolOutcome::new(symbol.clone());

        let price = match fetch_price(exchange, symbol).await {
            Ok(price) => price,
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "Price unavailable, skipping symbol");
                return outcome.fail(e);
            }
        };
        outcome.order.entry_price = Some(price);
        advance(&mut outcome, SymbolStage::PriceFetched);

        let constraints = match exchange.instrument_constraints(symbol).await {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::warn!(
                    symbol = %symbol,
                    error = %e,
                    "Instrument constraints unavailable, using raw quantity"
                );
                outcome.warn(ExecutionError::ConstraintLookupFailed {
                    symbol: symbol.to_string(),
                    reason: e.to_string(),
                });
                None
            }
        };

        let sizer = QuantitySizer::new(intent.notional);
        let Some(quantity) = sizer.futures_entry_quantity(price, constraints.as_ref()) else {
            return outcome.fail(ExecutionError::PriceUnavailable {
                symbol: symbol.to_string(),
                reason: "price not positive".to_string(),
            });
        };
        outcome.order.quantity = Some(quantity);
        advance(&mut outcome, SymbolStage::Sized);

        if let Some(leverage) = intent.leverage {
            if let Err(e) = exchange.set_leverage(symbol, leverage).await {
                tracing::warn!(symbol = %symbol, leverage, error = %e, "Leverage not applied");
                outcome.warn(e.into_order_rejection());
            }
        }

        let request = MarketOrderRequest::base(symbol.clone(), intent.entry_side(), quantity);
        match exchange.place_market_order(request).await {
            Ok(ack) => {
                tracing::info!(
                    symbol = %symbol,
                    side = label,
                    qty = %quantity,
                    price = %price,
                    order_id = %ack.order_id,
                    "Entry placed"
                );
            }
            Err(e) => {
                let error = e.into_order_rejection();
                tracing::error!(symbol = %symbol, side = label, error = %error, "Entry rejected");
                return outcome.fail(error);
            }
        }
        outcome.order.accepted = true;
        advance(&mut outcome, SymbolStage::EntryPlaced);

        let tick = constraints.and_then(|c| c.tick_size);
        let tp_price = self
            .take_profit
            .futures_trigger_price(price, intent.direction, tick);
        if tp_price <= Decimal::ZERO {
            tracing::warn!(symbol = %symbol, tp = %tp_price, "Take-profit rounds to zero, skipping");
            outcome.take_profit = TakeProfitOutcome::Skipped {
                reason: "take-profit rounds to zero".to_string(),
            };
            advance(&mut outcome, SymbolStage::TakeProfitSkipped);
            advance(&mut outcome, SymbolStage::Done);
            return outcome;
        }
        match exchange.attach_take_profit(symbol, tp_price).await {
            Ok(()) => {
                tracing::info!(symbol = %symbol, tp = %tp_price, "Take-profit attached");
                outcome.take_profit = TakeProfitOutcome::Placed {
                    price: tp_price,
                    quantity: None,
                };
                advance(&mut outcome, SymbolStage::TakeProfitPlaced);
            }
            Err(e) => {
                let error = e.into_order_rejection();
                tracing::error!(
                    symbol = %symbol,
                    tp = %tp_price,
                    error = %error,
                    "Take-profit rejected, position left without take-profit"
                );
                outcome.take_profit = TakeProfitOutcome::Rejected { error };
                advance(&mut outcome, SymbolStage::TakeProfitSkipped);
            }
        }

        advance(&mut outcome, SymbolStage::Done);
        outcome
    }
}
