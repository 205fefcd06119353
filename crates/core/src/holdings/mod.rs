// Module declarations
pub(crate) mod holdings_errors;
pub(crate) mod holdings_model;
pub(crate) mod holdings_repository;

// Re-export the public interface
pub use holdings_model::{Holding, HoldingDB};
pub use holdings_repository::HoldingRepository;

// Re-export error types for convenience
pub use holdings_errors::{HoldingError, Result};
