use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current valuation of one held position.
///
/// Pricing fields are `None` when the quote provider could not price the
/// symbol; such positions are excluded from the portfolio total and listed
/// in [`PortfolioSummary::unpriced`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionValuation {
    pub symbol: String,
    pub name: String,
    pub shares: i64,
    pub cost_basis: Decimal,
    pub average_cost: Decimal,
    pub current_price: Option<Decimal>,
    pub market_value: Option<Decimal>,
    pub gain_amount: Option<Decimal>,
    pub gain_percent: Option<Decimal>,
}

/// Read-only projection of a user's whole portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub username: String,
    pub cash: Decimal,
    /// Cash plus the market value of every priced position
    pub total_value: Decimal,
    pub positions: Vec<PositionValuation>,
    /// Symbols the quote provider could not price in this pass
    pub unpriced: Vec<String>,
}
