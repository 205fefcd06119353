use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of a completed buy operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyOutcome {
    pub symbol: String,
    pub name: String,
    pub shares: i64,
    pub executed_price: Decimal,
    /// Cash balance after the debit
    pub cash_after: Decimal,
}

/// Result of a completed sell operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellOutcome {
    pub symbol: String,
    pub shares: i64,
    pub executed_price: Decimal,
    /// Cash balance after the credit
    pub cash_after: Decimal,
}
