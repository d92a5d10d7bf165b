//! Steps shared by the venue sequencers.

use rust_decimal::Decimal;

use crate::application::ports::ExchangePort;
use crate::domain::execution::{ExecutionError, SymbolOutcome, SymbolStage};
use crate::domain::shared::Ticker;

/// Fetch a usable (positive) last price.
pub(super) async fn fetch_price<E>(exchange: &E, symbol: &Ticker) -> Result<Decimal, ExecutionError>
where
    E: ExchangePort + ?Sized,
{
    match exchange.last_price(symbol).await {
        Ok(price) if price > Decimal::ZERO => Ok(price),
        Ok(price) => Err(ExecutionError::PriceUnavailable {
            symbol: symbol.to_string(),
            reason: format!("non-positive last price {price}"),
        }),
        Err(e) => Err(ExecutionError::PriceUnavailable {
            symbol: symbol.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Advance `outcome`, logging a transition the pipeline should never make.
pub(super) fn advance(outcome: &mut SymbolOutcome, stage: SymbolStage) {
    if let Err(e) = outcome.advance(stage) {
        tracing::error!(symbol = %outcome.symbol, error = %e, "Invalid pipeline transition");
    }
}
