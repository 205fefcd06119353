use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::debug;
use std::sync::Arc;

use super::users_model::{NewUser, User};
use super::users_repository::UserRepository;
use crate::users::Result;

/// Service for managing users.
///
/// Credential material is opaque here: the caller hands in an already
/// computed password hash and verifies it itself at login time.
pub struct UserService {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl UserService {
    /// Creates a new UserService instance
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Registers a new user with the default starting cash balance
    pub fn register(&self, new_user: NewUser) -> Result<User> {
        debug!("Registering user '{}'", new_user.username);
        let repo = UserRepository::new(self.pool.clone());
        repo.create(new_user)
    }

    /// Retrieves a user by username
    pub fn get_user(&self, username: &str) -> Result<User> {
        let repo = UserRepository::new(self.pool.clone());
        repo.get_by_username(username)
    }
}
