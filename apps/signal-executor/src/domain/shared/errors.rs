//! Domain errors for the signal executor.

use std::fmt;

/// Domain-level errors, independent of infrastructure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid stage transition attempted.
    InvalidStateTransition {
        /// Entity the transition was attempted on (a ticker).
        entity: String,
        /// Current stage.
        from: String,
        /// Attempted stage.
        to: String,
    },

    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStateTransition { entity, from, to } => {
                write!(f, "Invalid stage transition for {entity}: {from} -> {to}")
            }
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
