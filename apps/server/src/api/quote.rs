use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use tradefolio_core::market_data::QuoteProvider;

use crate::error::ApiResult;
use crate::models::QuoteResponse;
use crate::state::AppState;

pub async fn get_quote(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<QuoteResponse>> {
    let quote = state.quote_provider.lookup(&symbol).await?;
    Ok(Json(QuoteResponse {
        symbol: quote.symbol,
        name: quote.name,
        price: quote.price,
    }))
}
