use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::get_connection;
use crate::holdings::{HoldingError, Result};
use crate::schema::holdings;

use super::holdings_model::{Holding, HoldingDB};

/// Repository for reading holding data.
///
/// Mutations to holdings happen exclusively inside the ledger's buy/sell
/// transactions, never through this repository.
pub struct HoldingRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl HoldingRepository {
    /// Creates a new HoldingRepository instance
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Lists all holdings for a user, ordered by symbol
    pub fn list_for_user(&self, username: &str) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| HoldingError::DatabaseError(e.to_string()))?;

        holdings::table
            .filter(holdings::user_id.eq(username))
            .order(holdings::symbol.asc())
            .load::<HoldingDB>(&mut conn)
            .map_err(HoldingError::from)
            .map(|rows| rows.into_iter().map(Holding::from).collect())
    }

    /// Retrieves the holding for (user, symbol), if any
    pub fn get_for_symbol(&self, username: &str, symbol: &str) -> Result<Option<Holding>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| HoldingError::DatabaseError(e.to_string()))?;

        holdings::table
            .filter(holdings::user_id.eq(username))
            .filter(holdings::symbol.eq(symbol))
            .first::<HoldingDB>(&mut conn)
            .optional()
            .map_err(HoldingError::from)
            .map(|row| row.map(Holding::from))
    }
}
