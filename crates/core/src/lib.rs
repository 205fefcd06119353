pub mod db;

pub mod errors;
pub mod holdings;
pub mod ledger;
pub mod market_data;
pub mod portfolio;
pub mod schema;
pub mod transactions;
pub mod users;

pub use errors::{Error, Result};

#[cfg(test)]
pub(crate) mod test_utils;
