use chrono::Utc;
use dashmap::DashMap;
use diesel::prelude::*;
use diesel::Connection;
use log::debug;
use rust_decimal::prelude::*;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::db::{get_connection, DbConnection, DbPool};
use crate::holdings::{Holding, HoldingDB};
use crate::market_data::{MarketDataError, QuoteInfo, QuoteProvider};
use crate::schema::{holdings, transactions, users};
use crate::transactions::{TransactionDB, TransactionSide};
use crate::users::UserDB;

use super::ledger_errors::{LedgerError, Result};
use super::ledger_model::{BuyOutcome, SellOutcome};

/// Service owning the buy/sell business rules.
///
/// All mutations of cash, holdings and the transaction log for one
/// operation commit inside a single SQLite transaction; a per-user async
/// mutex serializes concurrent operations for the same user so the
/// read-modify-write on cash can never observe stale state.
pub struct LedgerService {
    pool: Arc<DbPool>,
    provider: Arc<dyn QuoteProvider>,
    // One entry per username for the life of the service; never evicted,
    // so the map grows with the set of users that have traded.
    user_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl LedgerService {
    /// Creates a new LedgerService instance
    pub fn new(pool: Arc<DbPool>, provider: Arc<dyn QuoteProvider>) -> Self {
        Self {
            pool,
            provider,
            user_locks: DashMap::new(),
        }
    }

    /// Buys `shares` of `symbol` for `username` at the current quoted price.
    pub async fn buy(&self, username: &str, symbol: &str, shares: i64) -> Result<BuyOutcome> {
        if shares <= 0 {
            return Err(LedgerError::InvalidShareCount(shares));
        }
        if symbol.trim().is_empty() {
            return Err(LedgerError::InvalidSymbol("(empty)".to_string()));
        }

        let lock = self.user_lock(username);
        let _guard = lock.lock().await;

        // The quote is a network call; it must resolve before the write
        // transaction opens so the store is never blocked on the provider.
        let quote = self.lookup_quote(symbol).await?;
        let price = quote.price;
        let cost = price * Decimal::from(shares);
        debug!(
            "Buy {} x{} for '{}' at {} (cost {})",
            quote.symbol, shares, username, price, cost
        );

        let mut conn = get_connection(&self.pool)
            .map_err(|e| LedgerError::OperationFailed(e.to_string()))?;
        let now = Utc::now().naive_utc();

        self.with_retry(&mut conn, |tx| {
            let user = users::table
                .find(username)
                .first::<UserDB>(tx)
                .optional()?
                .ok_or_else(|| LedgerError::UserNotFound(username.to_string()))?;

            let cash = Decimal::from_f64_retain(user.cash).unwrap_or_default();
            if cash < cost {
                return Err(LedgerError::InsufficientFunds {
                    required: cost,
                    available: cash,
                });
            }
            let cash_after = cash - cost;

            diesel::update(users::table.find(username))
                .set((
                    users::cash.eq(cash_after.to_f64().unwrap_or_default()),
                    users::updated_at.eq(now),
                ))
                .execute(tx)?;

            let record = TransactionDB {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: username.to_string(),
                side: TransactionSide::Buy.as_str().to_string(),
                symbol: quote.symbol.clone(),
                shares,
                price: price.to_f64().unwrap_or_default(),
                timestamp: now,
            };
            diesel::insert_into(transactions::table)
                .values(&record)
                .execute(tx)?;

            let existing = holdings::table
                .filter(holdings::user_id.eq(username))
                .filter(holdings::symbol.eq(&quote.symbol))
                .first::<HoldingDB>(tx)
                .optional()?;

            match existing {
                None => {
                    let row = HoldingDB {
                        id: uuid::Uuid::new_v4().to_string(),
                        user_id: username.to_string(),
                        symbol: quote.symbol.clone(),
                        name: quote.name.clone(),
                        shares,
                        cost_basis: cost.to_f64().unwrap_or_default(),
                        created_at: now,
                        updated_at: now,
                    };
                    diesel::insert_into(holdings::table)
                        .values(&row)
                        .execute(tx)?;
                }
                Some(held) => {
                    let basis = Decimal::from_f64_retain(held.cost_basis).unwrap_or_default();
                    let new_basis = basis + cost;
                    diesel::update(holdings::table.find(&held.id))
                        .set((
                            holdings::shares.eq(held.shares + shares),
                            holdings::cost_basis.eq(new_basis.to_f64().unwrap_or_default()),
                            holdings::updated_at.eq(now),
                        ))
                        .execute(tx)?;
                }
            }

            Ok(BuyOutcome {
                symbol: quote.symbol.clone(),
                name: quote.name.clone(),
                shares,
                executed_price: price,
                cash_after,
            })
        })
    }

    /// Sells `shares` of `symbol` held by `username` at the current quoted price.
    pub async fn sell(&self, username: &str, symbol: &str, shares: i64) -> Result<SellOutcome> {
        if shares <= 0 {
            return Err(LedgerError::InvalidShareCount(shares));
        }
        if symbol.trim().is_empty() {
            return Err(LedgerError::InvalidSymbol("(empty)".to_string()));
        }

        let lock = self.user_lock(username);
        let _guard = lock.lock().await;

        let quote = self.lookup_quote(symbol).await?;
        let price = quote.price;
        let proceeds = price * Decimal::from(shares);
        debug!(
            "Sell {} x{} for '{}' at {} (proceeds {})",
            quote.symbol, shares, username, price, proceeds
        );

        let mut conn = get_connection(&self.pool)
            .map_err(|e| LedgerError::OperationFailed(e.to_string()))?;
        let now = Utc::now().naive_utc();

        self.with_retry(&mut conn, |tx| {
            let held: Holding = holdings::table
                .filter(holdings::user_id.eq(username))
                .filter(holdings::symbol.eq(&quote.symbol))
                .first::<HoldingDB>(tx)
                .optional()?
                .ok_or_else(|| LedgerError::NoSuchHolding {
                    username: username.to_string(),
                    symbol: quote.symbol.clone(),
                })?
                .into();

            if shares > held.shares {
                return Err(LedgerError::Oversell {
                    requested: shares,
                    held: held.shares,
                });
            }

            let remaining = held.shares - shares;
            if remaining == 0 {
                // No zero-share rows: the position disappears entirely
                diesel::delete(holdings::table.find(&held.id)).execute(tx)?;
            } else {
                let new_basis = held.cost_basis_after_sale(shares);
                diesel::update(holdings::table.find(&held.id))
                    .set((
                        holdings::shares.eq(remaining),
                        holdings::cost_basis.eq(new_basis.to_f64().unwrap_or_default()),
                        holdings::updated_at.eq(now),
                    ))
                    .execute(tx)?;
            }

            let user = users::table
                .find(username)
                .first::<UserDB>(tx)
                .optional()?
                .ok_or_else(|| LedgerError::UserNotFound(username.to_string()))?;
            let cash_after = Decimal::from_f64_retain(user.cash).unwrap_or_default() + proceeds;

            diesel::update(users::table.find(username))
                .set((
                    users::cash.eq(cash_after.to_f64().unwrap_or_default()),
                    users::updated_at.eq(now),
                ))
                .execute(tx)?;

            let record = TransactionDB {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: username.to_string(),
                side: TransactionSide::Sell.as_str().to_string(),
                symbol: quote.symbol.clone(),
                shares,
                price: price.to_f64().unwrap_or_default(),
                timestamp: now,
            };
            diesel::insert_into(transactions::table)
                .values(&record)
                .execute(tx)?;

            Ok(SellOutcome {
                symbol: quote.symbol.clone(),
                shares,
                executed_price: price,
                cash_after,
            })
        })
    }

    /// Resolves the symbol through the quote provider, mapping provider
    /// failures to typed ledger errors.
    async fn lookup_quote(&self, symbol: &str) -> Result<QuoteInfo> {
        self.provider.lookup(symbol).await.map_err(|e| match e {
            MarketDataError::NotFound(s) => LedgerError::InvalidSymbol(s),
            other => LedgerError::QuoteUnavailable(other.to_string()),
        })
    }

    fn user_lock(&self, username: &str) -> Arc<Mutex<()>> {
        self.user_locks
            .entry(username.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    /// Runs `op` in a transaction, retrying once when the store reports a
    /// transient (busy/locked/serialization) failure.
    pub(super) fn with_retry<T, F>(&self, conn: &mut DbConnection, op: F) -> Result<T>
    where
        F: Fn(&mut DbConnection) -> Result<T>,
    {
        let mut retried = false;
        loop {
            match conn.transaction::<T, LedgerError, _>(|tx| op(tx)) {
                Err(LedgerError::TransientStore(msg)) if !retried => {
                    retried = true;
                    debug!("Retrying ledger transaction after transient error: {}", msg);
                }
                Err(LedgerError::TransientStore(msg)) => {
                    return Err(LedgerError::OperationFailed(msg));
                }
                other => return other,
            }
        }
    }
}
