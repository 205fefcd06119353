use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tradefolio_core::errors::Error as CoreError;
use tradefolio_core::ledger::LedgerError;
use tradefolio_core::market_data::MarketDataError;
use tradefolio_core::transactions::TransactionError;
use tradefolio_core::users::UserError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    User(#[from] UserError),
    #[error("{0}")]
    Transaction(#[from] TransactionError),
    #[error("{0}")]
    MarketData(#[from] MarketDataError),
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Ledger(e) => match e {
                LedgerError::InvalidShareCount(_) | LedgerError::InvalidSymbol(_) => {
                    StatusCode::BAD_REQUEST
                }
                LedgerError::UserNotFound(_) | LedgerError::NoSuchHolding { .. } => {
                    StatusCode::NOT_FOUND
                }
                LedgerError::InsufficientFunds { .. } | LedgerError::Oversell { .. } => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                LedgerError::QuoteUnavailable(_) => StatusCode::BAD_GATEWAY,
                LedgerError::TransientStore(_) | LedgerError::OperationFailed(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::User(e) => match e {
                UserError::NotFound(_) => StatusCode::NOT_FOUND,
                UserError::AlreadyExists(_) => StatusCode::CONFLICT,
                UserError::InvalidData(_) => StatusCode::BAD_REQUEST,
                UserError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Transaction(e) => match e {
                TransactionError::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::MarketData(e) => match e {
                MarketDataError::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_GATEWAY,
            },
            ApiError::Core(e) => match e {
                CoreError::User(UserError::NotFound(_)) => StatusCode::NOT_FOUND,
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
