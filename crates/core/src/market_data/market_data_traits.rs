use async_trait::async_trait;

use super::market_data_errors::MarketDataError;
use super::market_data_model::QuoteInfo;

/// External pricing source.
///
/// Implementations talk to an untrusted network dependency; every failure
/// mode maps to a `MarketDataError`, never a panic.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn lookup(&self, symbol: &str) -> Result<QuoteInfo, MarketDataError>;
}
