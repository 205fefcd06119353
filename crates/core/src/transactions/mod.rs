// Module declarations
pub(crate) mod transactions_errors;
pub(crate) mod transactions_model;
pub(crate) mod transactions_repository;

// Re-export the public interface
pub use transactions_model::{Transaction, TransactionDB, TransactionSide};
pub use transactions_repository::TransactionRepository;

// Re-export error types for convenience
pub use transactions_errors::{Result, TransactionError};
