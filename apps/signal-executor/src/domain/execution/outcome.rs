//! Outcomes of executing a signal.
//!
//! Created per symbol per signal and discarded after logging. Nothing here is
//! persisted.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{ExecutionError, SymbolStage, Venue};
use crate::domain::shared::{DomainError, Ticker};
use crate::domain::signal::Signal;

/// Result of the entry order for one symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderResult {
    /// Whether the venue accepted the entry.
    pub accepted: bool,
    /// Reference price used for sizing.
    pub entry_price: Option<Decimal>,
    /// Entry quantity (base units for futures, estimated base units for spot).
    pub quantity: Option<Decimal>,
    /// Venue return code on rejection.
    pub error_code: Option<i64>,
}

/// What happened to the take-profit leg.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum TakeProfitOutcome {
    /// Never reached the take-profit step.
    #[default]
    NotAttempted,
    /// Accepted by the venue.
    Placed {
        /// Trigger or limit price.
        price: Decimal,
        /// Resting quantity for spot limit sells.
        quantity: Option<Decimal>,
    },
    /// Deliberately not placed.
    Skipped {
        /// Why it was skipped.
        reason: String,
    },
    /// The venue refused it. The entry stays open without a take-profit.
    Rejected {
        /// Rejection details.
        error: ExecutionError,
    },
}

/// Everything known about one symbol after its pipeline ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolOutcome {
    /// Base-asset ticker.
    pub symbol: Ticker,
    /// Last stage reached.
    pub stage: SymbolStage,
    /// Entry order result.
    pub order: OrderResult,
    /// Take-profit leg.
    pub take_profit: TakeProfitOutcome,
    /// Error that ended the symbol early, if any.
    pub failure: Option<ExecutionError>,
    /// Stage the symbol had reached when it failed.
    pub failed_at: Option<SymbolStage>,
    /// Non-fatal problems hit on the way (leverage, constraints).
    pub warnings: Vec<ExecutionError>,
}

impl SymbolOutcome {
    /// Fresh outcome for a parsed ticker.
    #[must_use]
    pub const fn new(symbol: Ticker) -> Self {
        Self {
            symbol,
            stage: SymbolStage::Parsed,
            order: OrderResult {
                accepted: false,
                entry_price: None,
                quantity: None,
                error_code: None,
            },
            take_profit: TakeProfitOutcome::NotAttempted,
            failure: None,
            failed_at: None,
            warnings: Vec::new(),
        }
    }

    /// Move to the next stage.
    ///
    /// # Errors
    ///
    /// Returns error if the transition is not allowed from the current stage.
    pub fn advance(&mut self, to: SymbolStage) -> Result<(), DomainError> {
        self.stage.validate_transition(to, self.symbol.as_str())?;
        self.stage = to;
        Ok(())
    }

    /// End the symbol early with `error`. The stage moves to `Done` and the
    /// stage reached is kept in `failed_at`.
    #[must_use]
    pub fn fail(mut self, error: ExecutionError) -> Self {
        if self.stage != SymbolStage::Done {
            self.failed_at = Some(self.stage);
            self.stage = SymbolStage::Done;
        }
        self.order.error_code = error.code();
        self.failure = Some(error);
        self
    }

    /// Record a non-fatal problem.
    pub fn warn(&mut self, error: ExecutionError) {
        self.warnings.push(error);
    }

    /// Returns true once the pipeline is finished with the symbol.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.stage == SymbolStage::Done
    }

    /// Returns true if the symbol finished without failing.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.is_done() && self.failure.is_none()
    }

    /// Returns true if a take-profit was accepted.
    #[must_use]
    pub const fn has_take_profit(&self) -> bool {
        matches!(self.take_profit, TakeProfitOutcome::Placed { .. })
    }
}

/// Report returned for every message handed to the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalReport {
    /// Venue of the executing process.
    pub venue: Venue,
    /// Parsed signal, `None` when the text was not recognized.
    pub signal: Option<Signal>,
    /// Per-symbol outcomes in signal order.
    pub outcomes: Vec<SymbolOutcome>,
    /// Error that abandoned the whole signal.
    pub abandoned: Option<ExecutionError>,
}

impl SignalReport {
    /// Report for unrecognized text.
    #[must_use]
    pub const fn ignored(venue: Venue) -> Self {
        Self {
            venue,
            signal: None,
            outcomes: Vec::new(),
            abandoned: None,
        }
    }

    /// Report for a signal abandoned before any symbol ran.
    #[must_use]
    pub const fn abandoned(venue: Venue, signal: Signal, error: ExecutionError) -> Self {
        Self {
            venue,
            signal: Some(signal),
            outcomes: Vec::new(),
            abandoned: Some(error),
        }
    }

    /// Report for a signal whose symbols all ran.
    #[must_use]
    pub const fn completed(venue: Venue, signal: Signal, outcomes: Vec<SymbolOutcome>) -> Self {
        Self {
            venue,
            signal: Some(signal),
            outcomes,
            abandoned: None,
        }
    }

    /// Returns true if the text was not a signal.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        self.signal.is_none()
    }

    /// Number of accepted entries.
    #[must_use]
    pub fn entries_accepted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.order.accepted).count()
    }

    /// Number of accepted take-profits.
    #[must_use]
    pub fn take_profits_placed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.has_take_profit()).count()
    }

    /// Outcome for `symbol`, first occurrence.
    #[must_use]
    pub fn outcome(&self, symbol: &str) -> Option<&SymbolOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.symbol.as_str().eq_ignore_ascii_case(symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signal::Direction;

    #[test]
    fn new_outcome_starts_parsed() {
        let outcome = SymbolOutcome::new(Ticker::new("eth"));
        assert_eq!(outcome.stage, SymbolStage::Parsed);
        assert!(!outcome.order.accepted);
        assert_eq!(outcome.take_profit, TakeProfitOutcome::NotAttempted);
    }

    #[test]
    fn advance_rejects_skipped_stage() {
        let mut outcome = SymbolOutcome::new(Ticker::new("eth"));
        assert!(outcome.advance(SymbolStage::EntryPlaced).is_err());
        assert_eq!(outcome.stage, SymbolStage::Parsed);
    }

    #[test]
    fn fail_ends_in_done_and_copies_code() {
        let mut outcome = SymbolOutcome::new(Ticker::new("eth"));
        outcome.advance(SymbolStage::PriceFetched).unwrap();
        outcome.advance(SymbolStage::Sized).unwrap();
        let outcome = outcome.fail(ExecutionError::OrderRejected {
            code: Some(10_001),
            message: "params error".to_string(),
        });
        assert_eq!(outcome.stage, SymbolStage::Done);
        assert_eq!(outcome.failed_at, Some(SymbolStage::Sized));
        assert_eq!(outcome.order.error_code, Some(10_001));
        assert!(outcome.is_done());
        assert!(!outcome.succeeded());
    }

    #[test]
    fn report_counts() {
        let mut placed = SymbolOutcome::new(Ticker::new("eth"));
        placed.order.accepted = true;
        placed.take_profit = TakeProfitOutcome::Placed {
            price: Decimal::ONE,
            quantity: None,
        };
        let failed = SymbolOutcome::new(Ticker::new("btc"));
        let signal = Signal::new(Direction::Short, vec![Ticker::new("eth"), Ticker::new("btc")]);

        let report = SignalReport::completed(Venue::Futures, signal, vec![placed, failed]);
        assert!(!report.is_ignored());
        assert_eq!(report.entries_accepted(), 1);
        assert_eq!(report.take_profits_placed(), 1);
        assert!(report.outcome("BTC").is_some());
    }

    #[test]
    fn ignored_report_is_empty() {
        let report = SignalReport::ignored(Venue::Spot);
        assert!(report.is_ignored());
        assert!(report.outcomes.is_empty());
        assert!(report.abandoned.is_none());
    }
}
