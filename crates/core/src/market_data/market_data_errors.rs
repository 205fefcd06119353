use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Symbol not found: {0}")]
    NotFound(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Parsing error: {0}")]
    ParsingError(String),
}

impl From<reqwest::Error> for MarketDataError {
    fn from(mut error: reqwest::Error) -> Self {
        // Request URLs carry the API token as a query parameter; strip the
        // query before the URL can surface in the error text.
        if let Some(url) = error.url_mut() {
            url.set_query(None);
        }
        MarketDataError::Unavailable(error.to_string())
    }
}
