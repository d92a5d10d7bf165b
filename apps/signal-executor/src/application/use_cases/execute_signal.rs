//! Execute Signal Use Case
//!
//! Entry point for raw chat text: parse, open an exchange session, and run
//! the venue sequencer for every symbol in order. One symbol failing never
//! stops its siblings.

use rust_decimal::Decimal;

use crate::application::ports::SessionFactory;
use crate::domain::execution::{
    ExecutionError, SignalReport, SymbolOutcome, TradeIntent, Venue,
};
use crate::domain::shared::Ticker;
use crate::domain::signal::{Direction, parse_signal};
use crate::domain::sizing::TakeProfitPolicy;

use super::{FuturesSequencer, SpotSequencer};

/// Trade parameters applied to every symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionSettings {
    /// Fixed notional per symbol in quote currency.
    pub notional: Decimal,
    /// Leverage multiplier (futures only).
    pub leverage: u32,
    /// Take-profit offset as a fraction.
    pub take_profit_pct: Decimal,
}

/// Turns chat text into orders on one venue.
pub struct SignalExecutor<F: SessionFactory> {
    factory: F,
    venue: Venue,
    settings: ExecutionSettings,
    spot: SpotSequencer,
    futures: FuturesSequencer,
}

impl<F: SessionFactory> SignalExecutor<F> {
    /// Create an executor for `venue`.
    pub fn new(factory: F, venue: Venue, settings: ExecutionSettings) -> Self {
        let policy = TakeProfitPolicy::new(settings.take_profit_pct);
        Self {
            factory,
            venue,
            settings,
            spot: SpotSequencer::new(policy),
            futures: FuturesSequencer::new(policy),
        }
    }

    /// Venue this executor trades.
    pub const fn venue(&self) -> Venue {
        self.venue
    }

    /// Handle one inbound message to completion.
    pub async fn handle(&self, text: &str) -> SignalReport {
        let Some(signal) = parse_signal(text) else {
            tracing::info!(venue = %self.venue, text, "IGNORE: unrecognized signal");
            return SignalReport::ignored(self.venue);
        };

        tracing::info!(
            venue = %self.venue,
            direction = signal.direction.label_for(self.venue),
            symbols = %signal.symbol_list(),
            "Signal parsed"
        );

        let session = match self.factory.open() {
            Ok(session) => session,
            Err(e) => {
                let error = ExecutionError::TransportUnavailable {
                    reason: e.to_string(),
                };
                tracing::error!(venue = %self.venue, error = %error, "Signal abandoned");
                return SignalReport::abandoned(self.venue, signal, error);
            }
        };

        let mut outcomes = Vec::with_capacity(signal.symbols.len());
        for symbol in &signal.symbols {
            let intent = self.intent_for(symbol, signal.direction);
            let outcome = match self.venue {
                Venue::Spot => self.spot.execute(&session, &intent).await,
                Venue::Futures => self.futures.execute(&session, &intent).await,
            };
            log_outcome(&outcome);
            outcomes.push(outcome);
        }

        let report = SignalReport::completed(self.venue, signal, outcomes);
        tracing::info!(
            venue = %self.venue,
            symbols = report.outcomes.len(),
            entries = report.entries_accepted(),
            take_profits = report.take_profits_placed(),
            "Signal processed"
        );
        tracing::info!("{}", "=".repeat(50));
        report
    }

    fn intent_for(&self, symbol: &Ticker, direction: Direction) -> TradeIntent {
        let intent = TradeIntent::new(symbol.clone(), direction, self.settings.notional);
        if self.venue.uses_leverage() {
            intent.with_leverage(self.settings.leverage)
        } else {
            intent
        }
    }
}

fn log_outcome(outcome: &SymbolOutcome) {
    match &outcome.failure {
        Some(error) => tracing::warn!(
            symbol = %outcome.symbol,
            failed_at = ?outcome.failed_at,
            error = %error,
            "Symbol failed"
        ),
        None => tracing::debug!(
            symbol = %outcome.symbol,
            stage = %outcome.stage,
            take_profit = outcome.has_take_profit(),
            "Symbol done"
        ),
    }
}
