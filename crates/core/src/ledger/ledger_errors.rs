use diesel::result::{DatabaseErrorKind, Error as DieselError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Custom error type for ledger operations.
///
/// Every variant except `OperationFailed` is an expected, recoverable
/// condition the caller is supposed to handle.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid share count: {0}")]
    InvalidShareCount(i64),

    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User '{username}' holds no shares of {symbol}")]
    NoSuchHolding { username: String, symbol: String },

    #[error("Insufficient funds: need {required}, have {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    #[error("Cannot sell {requested} shares, only {held} held")]
    Oversell { requested: i64, held: i64 },

    #[error("Quote provider unavailable: {0}")]
    QuoteUnavailable(String),

    #[error("Transient store error: {0}")]
    TransientStore(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl From<DieselError> for LedgerError {
    fn from(err: DieselError) -> Self {
        match &err {
            DieselError::DatabaseError(kind, info) => {
                let transient = matches!(kind, DatabaseErrorKind::SerializationFailure) || {
                    let msg = info.message().to_lowercase();
                    msg.contains("locked") || msg.contains("busy")
                };
                if transient {
                    LedgerError::TransientStore(err.to_string())
                } else {
                    LedgerError::OperationFailed(err.to_string())
                }
            }
            _ => LedgerError::OperationFailed(err.to_string()),
        }
    }
}

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;
