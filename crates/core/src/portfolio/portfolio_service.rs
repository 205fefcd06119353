use log::warn;
use num_traits::Zero;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::db::DbPool;
use crate::errors::Result;
use crate::holdings::HoldingRepository;
use crate::market_data::QuoteProvider;
use crate::users::UserRepository;

use super::portfolio_model::{PortfolioSummary, PositionValuation};

/// Read-path valuation over a user's holdings.
///
/// Pure projection: nothing is mutated. A quote-provider outage for a
/// subset of symbols degrades the result instead of failing it (see the
/// `unpriced` list on the summary).
pub struct PortfolioService {
    pool: Arc<DbPool>,
    provider: Arc<dyn QuoteProvider>,
}

impl PortfolioService {
    /// Creates a new PortfolioService instance
    pub fn new(pool: Arc<DbPool>, provider: Arc<dyn QuoteProvider>) -> Self {
        Self { pool, provider }
    }

    /// Values every holding of `username` at current prices.
    pub async fn valuation(&self, username: &str) -> Result<PortfolioSummary> {
        let user = UserRepository::new(self.pool.clone()).get_by_username(username)?;
        let holdings = HoldingRepository::new(self.pool.clone()).list_for_user(username)?;

        let mut positions = Vec::with_capacity(holdings.len());
        let mut unpriced = Vec::new();
        let mut total_value = user.cash;

        for holding in holdings {
            let average_cost = if holding.shares > 0 {
                holding.cost_basis / Decimal::from(holding.shares)
            } else {
                Decimal::ZERO
            };

            match self.provider.lookup(&holding.symbol).await {
                Ok(quote) => {
                    let market_value = quote.price * Decimal::from(holding.shares);
                    let gain_amount = market_value - holding.cost_basis;
                    let gain_percent = if holding.cost_basis.is_zero() {
                        None
                    } else {
                        Some(gain_amount / holding.cost_basis * Decimal::ONE_HUNDRED)
                    };
                    total_value += market_value;
                    positions.push(PositionValuation {
                        symbol: holding.symbol,
                        name: holding.name,
                        shares: holding.shares,
                        cost_basis: holding.cost_basis,
                        average_cost,
                        current_price: Some(quote.price),
                        market_value: Some(market_value),
                        gain_amount: Some(gain_amount),
                        gain_percent,
                    });
                }
                Err(e) => {
                    warn!("Could not price {} for '{}': {}", holding.symbol, username, e);
                    unpriced.push(holding.symbol.clone());
                    positions.push(PositionValuation {
                        symbol: holding.symbol,
                        name: holding.name,
                        shares: holding.shares,
                        cost_basis: holding.cost_basis,
                        average_cost,
                        current_price: None,
                        market_value: None,
                        gain_amount: None,
                        gain_percent: None,
                    });
                }
            }
        }

        Ok(PortfolioSummary {
            username: user.username,
            cash: user.cash,
            total_value,
            positions,
            unpriced,
        })
    }
}
