use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use super::users_constants::STARTING_CASH;
use super::users_errors::{Result, UserError};

/// Domain model representing a registered user.
///
/// The username is the identity and never changes; cash is the only
/// attribute the ledger mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub cash: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for registering a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    /// Validates the new user data
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(UserError::InvalidData(
                "Username cannot be empty".to_string(),
            ));
        }
        if self.password_hash.trim().is_empty() {
            return Err(UserError::InvalidData(
                "Password hash cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Database model for users
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(primary_key(username))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub username: String,
    pub password_hash: String,
    pub cash: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            username: db.username,
            password_hash: db.password_hash,
            cash: Decimal::from_f64_retain(db.cash).unwrap_or_default(),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewUser> for UserDB {
    fn from(domain: NewUser) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            username: domain.username,
            password_hash: domain.password_hash,
            cash: STARTING_CASH,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_rejects_blank_username() {
        let new_user = NewUser {
            username: "   ".to_string(),
            password_hash: "hash".to_string(),
        };
        assert!(matches!(
            new_user.validate(),
            Err(UserError::InvalidData(_))
        ));
    }

    #[test]
    fn registration_starts_with_default_cash() {
        let new_user = NewUser {
            username: "alice".to_string(),
            password_hash: "hash".to_string(),
        };
        let db: UserDB = new_user.into();
        assert_eq!(db.cash, STARTING_CASH);
    }
}
