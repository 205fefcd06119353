use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::get_connection;
use crate::schema::transactions;
use crate::transactions::{Result, TransactionError};

use super::transactions_model::{Transaction, TransactionDB};

/// Repository for reading transaction history.
///
/// Appends happen inside the ledger's buy/sell transactions; history rows
/// are never updated or deleted.
pub struct TransactionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository instance
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Lists all transactions for a user, newest first
    pub fn list_for_user(&self, username: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| TransactionError::DatabaseError(e.to_string()))?;

        let rows = transactions::table
            .filter(transactions::user_id.eq(username))
            .order(transactions::timestamp.desc())
            .load::<TransactionDB>(&mut conn)?;

        rows.into_iter().map(Transaction::try_from).collect()
    }
}
