// Module declarations
pub(crate) mod ledger_errors;
pub(crate) mod ledger_model;
pub(crate) mod ledger_service;

#[cfg(test)]
mod tests;

// Re-export the public interface
pub use ledger_errors::{LedgerError, Result};
pub use ledger_model::{BuyOutcome, SellOutcome};
pub use ledger_service::LedgerService;
