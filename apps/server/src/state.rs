use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use tradefolio_core::{
    db,
    ledger::LedgerService,
    market_data::{HttpQuoteProvider, QuoteProvider},
    portfolio::PortfolioService,
    transactions::TransactionRepository,
    users::UserService,
};

use crate::auth::AuthManager;
use crate::config::Config;

pub struct AppState {
    pub user_service: UserService,
    pub ledger_service: LedgerService,
    pub portfolio_service: PortfolioService,
    pub transaction_repository: TransactionRepository,
    pub quote_provider: Arc<dyn QuoteProvider>,
    pub auth: AuthManager,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    let provider: Arc<dyn QuoteProvider> = Arc::new(HttpQuoteProvider::new(
        config.quote_base_url.clone(),
        config.quote_api_token.clone(),
        Some(config.quote_timeout),
    )?);

    let auth = AuthManager::new(&config.jwt_secret, config.token_ttl);

    Ok(Arc::new(AppState {
        user_service: UserService::new(pool.clone()),
        ledger_service: LedgerService::new(pool.clone(), provider.clone()),
        portfolio_service: PortfolioService::new(pool.clone(), provider.clone()),
        transaction_repository: TransactionRepository::new(pool),
        quote_provider: provider,
        auth,
    }))
}
