//! Spot Order Sequencer
//!
//! Per symbol: reference price, a market entry sized in quote currency, and
//! for accepted buys a resting GTC limit sell as take-profit. Sells never get
//! a take-profit.

use rust_decimal::Decimal;

use crate::application::ports::{ExchangePort, LimitOrderRequest, MarketOrderRequest};
use crate::domain::execution::{
    ExecutionError, SymbolOutcome, SymbolStage, TakeProfitOutcome, TradeIntent, Venue,
};
use crate::domain::shared::OrderSide;
use crate::domain::sizing::{QuantitySizer, TakeProfitPolicy};

use super::pipeline::{advance, fetch_price};

/// Sequencer for the spot market.
#[derive(Debug, Clone, Copy)]
pub struct SpotSequencer {
    take_profit: TakeProfitPolicy,
}

impl SpotSequencer {
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
        let side = intent.entry_side();
        let label = intent.direction.label_for(Venue::Spot);
        let mut outcome = SymbolOutcome::new(symbol.clone());

        let reference = match fetch_price(exchange, symbol).await {
            Ok(price) => price,
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "Price unavailable, skipping symbol");
                return outcome.fail(e);
            }
        };
        outcome.order.entry_price = Some(reference);
        advance(&mut outcome, SymbolStage::PriceFetched);

        let sizer = QuantitySizer::new(intent.notional);
        let Some(base_estimate) = sizer.raw_quantity(reference) else {
            return outcome.fail(ExecutionError::PriceUnavailable {
                symbol: symbol.to_string(),
                reason: "price not positive".to_string(),
            });
        };
        outcome.order.quantity = Some(base_estimate);
        advance(&mut outcome, SymbolStage::Sized);

        let request = MarketOrderRequest::quote(symbol.clone(), side, intent.notional);
        match exchange.place_market_order(request).await {
            Ok(ack) => {
                tracing::info!(
                    symbol = %symbol,
                    side = label,
                    quote_amount = %intent.notional,
                    price = %reference,
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

        if side == OrderSide::Sell {
            return Self::skip(outcome, "sell entries carry no take-profit");
        }

        let constraints = match exchange.instrument_constraints(symbol).await {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(
                    symbol = %symbol,
                    error = %e,
                    "Instrument constraints unavailable, skipping take-profit"
                );
                outcome.warn(ExecutionError::ConstraintLookupFailed {
                    symbol: symbol.to_string(),
                    reason: e.to_string(),
                });
                return Self::skip(outcome, "instrument constraints unavailable");
            }
        };

        let tp_reference = match fetch_price(exchange, symbol).await {
            Ok(price) => price,
            Err(e) => {
                tracing::warn!(
                    symbol = %symbol,
                    error = %e,
                    fallback = %reference,
                    "Price refresh failed, using entry reference"
                );
                reference
            }
        };

        let tp = self
            .take_profit
            .spot_take_profit(tp_reference, base_estimate, &constraints);
        if tp.price <= Decimal::ZERO || tp.quantity <= Decimal::ZERO {
            tracing::warn!(
                symbol = %symbol,
                tp = %tp.price,
                qty = %tp.quantity,
                "Take-profit rounds to zero, skipping"
            );
            return Self::skip(outcome, "take-profit rounds to zero");
        }

        let request =
            LimitOrderRequest::gtc(symbol.clone(), side.opposite(), tp.quantity, tp.price);
        match exchange.place_limit_order(request).await {
            Ok(ack) => {
                tracing::info!(
                    symbol = %symbol,
                    tp = %tp.price,
                    qty = %tp.quantity,
                    order_id = %ack.order_id,
                    "Take-profit limit sell placed"
                );
                outcome.take_profit = TakeProfitOutcome::Placed {
                    price: tp.price,
                    quantity: Some(tp.quantity),
                };
                advance(&mut outcome, SymbolStage::TakeProfitPlaced);
            }
            Err(e) => {
                let error = e.into_order_rejection();
                tracing::error!(
                    symbol = %symbol,
                    tp = %tp.price,
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

    fn skip(mut outcome: SymbolOutcome, reason: &str) -> SymbolOutcome {
        outcome.take_profit = TakeProfitOutcome::Skipped {
            reason: reason.to_string(),
        };
        advance(&mut outcome, SymbolStage::TakeProfitSkipped);
        advance(&mut outcome, SymbolStage::Done);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ExchangeError, OrderSize};
    use crate::application::use_cases::testing::{Call, ScriptedExchange};
    use crate::domain::shared::Ticker;
    use crate::domain::signal::Direction;
    use crate::domain::sizing::InstrumentConstraints;
    use rust_decimal_macros::dec;

    fn sequencer() -> SpotSequencer {
        SpotSequencer::new(TakeProfitPolicy::new(dec!(0.15)))
    }

    fn intent(symbol: &str, direction: Direction) -> TradeIntent {
        TradeIntent::new(Ticker::new(symbol), direction, dec!(5))
    }

    fn eth_constraints() -> InstrumentConstraints {
        InstrumentConstraints::new(dec!(0.0001), dec!(0.0001)).with_tick_size(dec!(0.01))
    }

    #[tokio::test]
    async fn buy_places_quote_entry_and_floored_limit_sell() {
        let exchange = ScriptedExchange::new()
            .with_prices("ETH", vec![Ok(dec!(2000)), Ok(dec!(2010.3))])
            .with_constraints("ETH", eth_constraints());

        let outcome = sequencer()
            .execute(&exchange, &intent("eth", Direction::Long))
            .await;

        assert!(outcome.is_done());
        // 2010.3 * 1.15 = 2311.845 -> 2311.84
        assert_eq!(
            outcome.take_profit,
            TakeProfitOutcome::Placed {
                price: dec!(2311.84),
                quantity: Some(dec!(0.0025)),
            }
        );
        let calls = exchange.calls();
        assert_eq!(
            calls[1],
            Call::Market(MarketOrderRequest {
                symbol: Ticker::new("ETH"),
                side: OrderSide::Buy,
                size: OrderSize::Quote(dec!(5)),
            })
        );
        assert_eq!(
            calls.last(),
            Some(&Call::Limit(LimitOrderRequest::gtc(
                Ticker::new("ETH"),
                OrderSide::Sell,
                dec!(0.0025),
                dec!(2311.84),
            )))
        );
    }

    #[tokio::test]
    async fn sell_never_gets_take_profit() {
        let exchange = ScriptedExchange::new()
            .with_price("ETH", dec!(2000))
            .with_constraints("ETH", eth_constraints());

        let outcome = sequencer()
            .execute(&exchange, &intent("eth", Direction::Short))
            .await;

        assert!(outcome.order.accepted);
        assert!(outcome.is_done());
        assert!(matches!(
            outcome.take_profit,
            TakeProfitOutcome::Skipped { .. }
        ));
        assert_eq!(exchange.calls().len(), 2);
    }

    #[tokio::test]
    async fn refresh_failure_falls_back_to_reference_price() {
        let exchange = ScriptedExchange::new()
            .with_prices(
                "ETH",
                vec![
                    Ok(dec!(2000)),
                    Err(ExchangeError::Connection {
                        message: "reset".to_string(),
                    }),
                ],
            )
            .with_constraints("ETH", eth_constraints());

        let outcome = sequencer()
            .execute(&exchange, &intent("eth", Direction::Long))
            .await;

        assert_eq!(
            outcome.take_profit,
            TakeProfitOutcome::Placed {
                price: dec!(2300),
                quantity: Some(dec!(0.0025)),
            }
        );
    }

    #[tokio::test]
    async fn constraint_failure_skips_take_profit() {
        let exchange = ScriptedExchange::new()
            .with_price("ETH", dec!(2000))
            .with_constraint_error("ETH");

        let outcome = sequencer()
            .execute(&exchange, &intent("eth", Direction::Long))
            .await;

        assert!(outcome.order.accepted);
        assert_eq!(outcome.stage, SymbolStage::Done);
        assert!(matches!(
            outcome.take_profit,
            TakeProfitOutcome::Skipped { .. }
        ));
        assert!(
            !exchange
                .calls()
                .iter()
                .any(|c| matches!(c, Call::Limit(..)))
        );
    }

    #[tokio::test]
    async fn rejected_entry_ends_symbol() {
        let exchange = ScriptedExchange::new()
            .with_price("ETH", dec!(2000))
            .reject_market("ETH", 170_131);

        let outcome = sequencer()
            .execute(&exchange, &intent("eth", Direction::Long))
            .await;

        assert!(!outcome.order.accepted);
        assert_eq!(outcome.order.error_code, Some(170_131));
        assert_eq!(outcome.take_profit, TakeProfitOutcome::NotAttempted);
    }

    #[tokio::test]
    async fn rejected_limit_sell_is_reported() {
        let exchange = ScriptedExchange::new()
            .with_price("ETH", dec!(2000))
            .with_constraints("ETH", eth_constraints())
            .reject_limit(170_136);

        let outcome = sequencer()
            .execute(&exchange, &intent("eth", Direction::Long))
            .await;

        assert!(outcome.order.accepted);
        assert!(matches!(
            outcome.take_profit,
            TakeProfitOutcome::Rejected {
                error: ExecutionError::OrderRejected {
                    code: Some(170_136),
                    ..
                }
            }
        ));
    }

    #[tokio::test]
    async fn no_leverage_on_spot() {
        let exchange = ScriptedExchange::new()
            .with_price("ETH", dec!(2000))
            .with_constraints("ETH", eth_constraints());
        let intent = intent("eth", Direction::Long).with_leverage(5);

        sequencer().execute(&exchange, &intent).await;

        assert!(
            !exchange
                .calls()
                .iter()
                .any(|c| matches!(c, Call::SetLeverage(..)))
        );
    }
}
