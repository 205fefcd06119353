use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::db::{self, DbPool};
use crate::market_data::{MarketDataError, QuoteInfo, QuoteProvider};
use crate::users::{NewUser, UserService};

/// Builds a pool over a throwaway on-disk SQLite database with migrations
/// applied, so every pooled connection sees the same data.
pub fn test_pool() -> Arc<DbPool> {
    let path = std::env::temp_dir().join(format!("tradefolio-test-{}.db", uuid::Uuid::new_v4()));
    let path = path.to_str().expect("temp path is valid utf-8").to_string();
    db::init(&path).expect("init test database");
    let pool = db::create_pool(&path).expect("create test pool");
    db::run_migrations(&pool).expect("run migrations");
    pool
}

pub fn register_user(pool: &Arc<DbPool>, username: &str) {
    UserService::new(pool.clone())
        .register(NewUser {
            username: username.to_string(),
            password_hash: "test-hash".to_string(),
        })
        .expect("register test user");
}

/// In-memory quote provider with adjustable prices; unknown symbols map
/// to `MarketDataError::NotFound` like a real provider 404.
pub struct MockQuoteProvider {
    prices: RwLock<HashMap<String, Decimal>>,
}

impl MockQuoteProvider {
    pub fn new() -> Self {
        Self {
            prices: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_price(symbol: &str, price: Decimal) -> Arc<Self> {
        let provider = Self::new();
        provider.set_price(symbol, price);
        Arc::new(provider)
    }

    pub fn set_price(&self, symbol: &str, price: Decimal) {
        self.prices
            .write()
            .expect("price map lock")
            .insert(symbol.to_string(), price);
    }

    pub fn remove_price(&self, symbol: &str) {
        self.prices.write().expect("price map lock").remove(symbol);
    }
}

#[async_trait]
impl QuoteProvider for MockQuoteProvider {
    fn name(&self) -> &'static str {
        "MOCK"
    }

    async fn lookup(&self, symbol: &str) -> Result<QuoteInfo, MarketDataError> {
        self.prices
            .read()
            .expect("price map lock")
            .get(symbol)
            .map(|price| QuoteInfo {
                symbol: symbol.to_string(),
                name: format!("{} Inc", symbol),
                price: *price,
            })
            .ok_or_else(|| MarketDataError::NotFound(symbol.to_string()))
    }
}
