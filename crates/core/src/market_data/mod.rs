// Module declarations
pub(crate) mod market_data_errors;
pub(crate) mod market_data_model;
pub(crate) mod market_data_traits;
pub mod providers;

// Re-export the public interface
pub use market_data_errors::MarketDataError;
pub use market_data_model::QuoteInfo;
pub use market_data_traits::QuoteProvider;
pub use providers::http_provider::HttpQuoteProvider;
