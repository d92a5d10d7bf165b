//! Bybit-specific error types.

use thiserror::Error;

use crate::application::ports::ExchangeError;

/// Errors from the Bybit adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BybitError {
    /// Non-success HTTP status.
    #[error("HTTP error {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// API answered with a non-zero `retCode`.
    #[error("API error: {code} - {message}")]
    Api {
        /// Bybit return code.
        code: i64,
        /// Bybit return message.
        message: String,
    },

    /// API key or secret missing.
    #[error("Bybit API credentials not configured")]
    MissingCredentials,

    /// Network error.
    #[error("Network error: {0}")]
    Network(String),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// A list endpoint returned no entry for the instrument.
    #[error("No {what} returned for {symbol}")]
    EmptyResult {
        /// Which list was empty.
        what: &'static str,
        /// Instrument name.
        symbol: String,
    },

    /// A numeric string field could not be parsed.
    #[error("Invalid number in {field}: {value:?}")]
    InvalidNumber {
        /// Field name.
        field: &'static str,
        /// Raw value.
        value: String,
    },
}

/// Bybit code for "leverage not modified".
pub const LEVERAGE_NOT_MODIFIED: i64 = 110_043;

impl From<BybitError> for ExchangeError {
    fn from(err: BybitError) -> Self {
        match err {
            BybitError::Http { status, body } if status == 401 || status == 403 => {
                Self::Unauthenticated { message: body }
            }
            BybitError::Http { status, body } => Self::Connection {
                message: format!("HTTP {status}: {body}"),
            },
            BybitError::Network(message) => Self::Connection { message },
            BybitError::Api { code, message } => Self::Rejected { code, message },
            BybitError::MissingCredentials => Self::Unauthenticated {
                message: "BYBIT_API_KEY / BYBIT_API_SECRET not set".to_string(),
            },
            BybitError::JsonParse(message) => Self::InvalidResponse { message },
            BybitError::InvalidNumber { field, value } => Self::InvalidResponse {
                message: format!("invalid {field}: {value:?}"),
            },
            BybitError::EmptyResult { symbol, .. } => Self::InstrumentNotFound { symbol },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bybit_error_to_exchange_error_api() {
        let err = BybitError::Api {
            code: 110_007,
            message: "ab not enough for new order".to_string(),
        };
        let exchange_err: ExchangeError = err.into();
        assert_eq!(exchange_err.code(), Some(110_007));
    }

    #[test]
    fn bybit_error_to_exchange_error_network() {
        let err = BybitError::Network("connection refused".to_string());
        let exchange_err: ExchangeError = err.into();
        assert!(matches!(exchange_err, ExchangeError::Connection { .. }));
    }

    #[test]
    fn bybit_error_to_exchange_error_auth() {
        let exchange_err: ExchangeError = BybitError::MissingCredentials.into();
        assert!(matches!(exchange_err, ExchangeError::Unauthenticated { .. }));

        let exchange_err: ExchangeError = BybitError::Http {
            status: 401,
            body: "invalid api key".to_string(),
        }
        .into();
        assert!(matches!(exchange_err, ExchangeError::Unauthenticated { .. }));
    }

    #[test]
    fn bybit_error_to_exchange_error_empty() {
        let err = BybitError::EmptyResult {
            what: "ticker",
            symbol: "NOPEUSDT".to_string(),
        };
        let exchange_err: ExchangeError = err.into();
        assert_eq!(
            exchange_err,
            ExchangeError::InstrumentNotFound {
                symbol: "NOPEUSDT".to_string()
            }
        );
    }
}
