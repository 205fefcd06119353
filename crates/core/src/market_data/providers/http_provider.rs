use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::prelude::*;
use std::time::Duration;

use crate::market_data::market_data_errors::MarketDataError;
use crate::market_data::market_data_model::QuoteInfo;
use crate::market_data::market_data_traits::QuoteProvider;

const DEFAULT_BASE_URL: &str = "https://cloud.iexapis.com/stable";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Quote provider backed by an IEX-style HTTP quote endpoint.
pub struct HttpQuoteProvider {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpQuoteProvider {
    pub fn new(base_url: Option<String>, token: String, timeout: Option<Duration>) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;
        Ok(HttpQuoteProvider {
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token,
        })
    }

    async fn fetch_data(&self, url: &str) -> Result<String, MarketDataError> {
        let response = self.client.get(url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(MarketDataError::NotFound(url.to_string()));
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(MarketDataError::Unauthorized(
                    "Quote API token rejected".to_string(),
                ));
            }
            status if !status.is_success() => {
                return Err(MarketDataError::Unavailable(format!(
                    "Quote endpoint returned {}",
                    status
                )));
            }
            _ => {}
        }
        let text = response.text().await?;
        Ok(text)
    }
}

#[async_trait]
impl QuoteProvider for HttpQuoteProvider {
    fn name(&self) -> &'static str {
        "IEX_HTTP"
    }

    async fn lookup(&self, symbol: &str) -> Result<QuoteInfo, MarketDataError> {
        let url = format!(
            "{}/stock/{}/quote?token={}",
            self.base_url, symbol, self.token
        );
        let response_text = self
            .fetch_data(&url)
            .await
            .map_err(|e| match e {
                // Rewrite the not-found detail so the token never leaks into errors
                MarketDataError::NotFound(_) => MarketDataError::NotFound(symbol.to_string()),
                other => other,
            })?;
        let response_json: serde_json::Value = serde_json::from_str(&response_text)
            .map_err(|e| MarketDataError::ParsingError(e.to_string()))?;

        let quoted_symbol = response_json["symbol"]
            .as_str()
            .ok_or_else(|| MarketDataError::ParsingError("Missing 'symbol' field".to_string()))?;
        let name = response_json["companyName"].as_str().unwrap_or(quoted_symbol);
        let price = response_json["latestPrice"]
            .as_f64()
            .and_then(Decimal::from_f64_retain)
            .ok_or_else(|| {
                MarketDataError::ParsingError("Missing or invalid 'latestPrice' field".to_string())
            })?;

        Ok(QuoteInfo {
            symbol: quoted_symbol.to_string(),
            name: name.to_string(),
            price,
        })
    }
}
