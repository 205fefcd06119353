use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Domain model for a user's position in one symbol.
///
/// At most one holding exists per (user, symbol); a holding whose share
/// count reaches zero is deleted, never stored at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub name: String,
    pub shares: i64,
    pub cost_basis: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Holding {
    /// Cost basis remaining after selling `sold` of the held shares.
    ///
    /// The reduction is proportional, so the average cost per share is
    /// unchanged by a partial sale. Selling everything leaves zero.
    pub fn cost_basis_after_sale(&self, sold: i64) -> Decimal {
        let remaining = self.shares - sold;
        if remaining <= 0 {
            return Decimal::ZERO;
        }
        self.cost_basis * Decimal::from(remaining) / Decimal::from(self.shares)
    }
}

/// Database model for holdings
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::holdings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HoldingDB {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub name: String,
    pub shares: i64,
    pub cost_basis: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<HoldingDB> for Holding {
    fn from(db: HoldingDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            symbol: db.symbol,
            name: db.name,
            shares: db.shares,
            cost_basis: Decimal::from_f64_retain(db.cost_basis).unwrap_or_default(),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
