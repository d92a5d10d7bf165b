//! Per-symbol pipeline stages.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// Stage a symbol has reached in the signal pipeline.
///
/// ```text
/// Parsed -> PriceFetched -> Sized -> EntryPlaced -> TakeProfitPlaced  -> Done
///                                               \-> TakeProfitSkipped -> Done
/// ```
///
/// A failure at price fetch or entry moves the symbol straight to `Done`
/// from whichever of `Parsed`, `PriceFetched` or `Sized` it had reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SymbolStage {
    /// Ticker extracted from the signal.
    Parsed,
    /// Last price known.
    PriceFetched,
    /// Order quantity computed.
    Sized,
    /// Market entry accepted by the venue.
    EntryPlaced,
    /// Take-profit accepted by the venue.
    TakeProfitPlaced,
    /// Take-profit not placed (sell side, missing constraints, or rejected).
    TakeProfitSkipped,
    /// Pipeline finished for this symbol.
    Done,
}

impl SymbolStage {
    /// Check if a stage transition is valid.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Parsed, Self::PriceFetched)
                | (Self::PriceFetched, Self::Sized)
                | (Self::Sized, Self::EntryPlaced)
                | (Self::EntryPlaced, Self::TakeProfitPlaced)
                | (Self::EntryPlaced, Self::TakeProfitSkipped)
                | (Self::TakeProfitPlaced, Self::Done)
                | (Self::TakeProfitSkipped, Self::Done)
                | (Self::Parsed | Self::PriceFetched | Self::Sized, Self::Done)
        )
    }

    /// Validate a stage transition.
    ///
    /// # Errors
    ///
    /// Returns error if the transition skips or revisits a stage.
    pub fn validate_transition(self, to: Self, symbol: &str) -> Result<(), DomainError> {
        if self.can_transition_to(to) {
            Ok(())
        } else {
            Err(DomainError::InvalidStateTransition {
                entity: symbol.to_string(),
                from: self.to_string(),
                to: to.to_string(),
            })
        }
    }
}

impl fmt::Display for SymbolStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Parsed => "Parsed",
            Self::PriceFetched => "PriceFetched",
            Self::Sized => "Sized",
            Self::EntryPlaced => "EntryPlaced",
            Self::TakeProfitPlaced => "TakeProfitPlaced",
            Self::TakeProfitSkipped => "TakeProfitSkipped",
            Self::Done => "Done",
        };
        write!(f, "{s}")
    }
}
