use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::transactions_errors::TransactionError;

/// Direction of a ledger event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionSide {
    Buy,
    Sell,
}

impl TransactionSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionSide::Buy => "BUY",
            TransactionSide::Sell => "SELL",
        }
    }
}

impl fmt::Display for TransactionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionSide {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(TransactionSide::Buy),
            "SELL" => Ok(TransactionSide::Sell),
            other => Err(TransactionError::InvalidData(format!(
                "Unknown transaction side '{}'",
                other
            ))),
        }
    }
}

/// Immutable audit record of one buy or sell event.
///
/// Rows are created exactly once per completed operation and never updated
/// or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub side: TransactionSide,
    pub symbol: String,
    pub shares: i64,
    pub price: Decimal,
    pub timestamp: NaiveDateTime,
}

/// Database model for transactions
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub side: String,
    pub symbol: String,
    pub shares: i64,
    pub price: f64,
    pub timestamp: NaiveDateTime,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = TransactionError;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            user_id: db.user_id,
            side: db.side.parse()?,
            symbol: db.symbol,
            shares: db.shares,
            price: Decimal::from_f64_retain(db.price).unwrap_or_default(),
            timestamp: db.timestamp,
        })
    }
}
