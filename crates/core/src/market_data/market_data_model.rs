use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time price lookup result for one ticker symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteInfo {
    /// Canonical symbol as reported by the provider
    pub symbol: String,
    /// Display name of the instrument
    pub name: String,
    /// Current price per share
    pub price: Decimal,
}
