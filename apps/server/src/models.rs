use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tradefolio_core::ledger::{BuyOutcome, SellOutcome};
use tradefolio_core::portfolio::{PortfolioSummary, PositionValuation};
use tradefolio_core::transactions::Transaction;

/// Renders a money amount the way the ledger UI shows it
pub fn usd(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%m/%d/%Y %H:%M:%S").to_string()
}

// ---------------------------------------------------------------------------
// Requests

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub confirmation: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    pub symbol: String,
    pub shares: i64,
}

// ---------------------------------------------------------------------------
// Responses

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub username: String,
    pub cash: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub symbol: String,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeResponse {
    pub symbol: String,
    pub name: Option<String>,
    pub shares: i64,
    pub executed_price: Decimal,
    pub cash_after: String,
}

impl From<BuyOutcome> for TradeResponse {
    fn from(outcome: BuyOutcome) -> Self {
        Self {
            symbol: outcome.symbol,
            name: Some(outcome.name),
            shares: outcome.shares,
            executed_price: outcome.executed_price,
            cash_after: usd(outcome.cash_after),
        }
    }
}

impl From<SellOutcome> for TradeResponse {
    fn from(outcome: SellOutcome) -> Self {
        Self {
            symbol: outcome.symbol,
            name: None,
            shares: outcome.shares,
            executed_price: outcome.executed_price,
            cash_after: usd(outcome.cash_after),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDto {
    pub symbol: String,
    pub name: String,
    pub shares: i64,
    pub cost_basis: String,
    pub average_cost: String,
    pub current_price: Option<String>,
    pub market_value: Option<String>,
    pub gain_amount: Option<String>,
    pub gain_percent: Option<Decimal>,
}

impl From<PositionValuation> for PositionDto {
    fn from(p: PositionValuation) -> Self {
        Self {
            symbol: p.symbol,
            name: p.name,
            shares: p.shares,
            cost_basis: usd(p.cost_basis),
            average_cost: usd(p.average_cost),
            current_price: p.current_price.map(usd),
            market_value: p.market_value.map(usd),
            gain_amount: p.gain_amount.map(usd),
            gain_percent: p.gain_percent.map(|pct| pct.round_dp(2)),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub username: String,
    pub cash: String,
    pub total_value: String,
    pub positions: Vec<PositionDto>,
    pub unpriced: Vec<String>,
}

impl From<PortfolioSummary> for PortfolioResponse {
    fn from(summary: PortfolioSummary) -> Self {
        Self {
            username: summary.username,
            cash: usd(summary.cash),
            total_value: usd(summary.total_value),
            positions: summary.positions.into_iter().map(PositionDto::from).collect(),
            unpriced: summary.unpriced,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub side: String,
    pub symbol: String,
    pub shares: i64,
    pub price: String,
    pub timestamp: String,
}

impl From<Transaction> for HistoryEntry {
    fn from(t: Transaction) -> Self {
        Self {
            side: t.side.to_string(),
            symbol: t.symbol,
            shares: t.shares,
            price: usd(t.price),
            timestamp: format_timestamp(t.timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn usd_pads_and_rounds_to_cents() {
        assert_eq!(usd(dec!(8500)), "$8500.00");
        assert_eq!(usd(dec!(0.1)), "$0.10");
        assert_eq!(usd(dec!(160.128)), "$160.13");
    }
}
