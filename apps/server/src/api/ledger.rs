use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use tracing::info;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::models::{TradeRequest, TradeResponse};
use crate::state::AppState;

pub async fn buy(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(username)): Extension<AuthUser>,
    Json(payload): Json<TradeRequest>,
) -> ApiResult<Json<TradeResponse>> {
    let outcome = state
        .ledger_service
        .buy(&username, &payload.symbol, payload.shares)
        .await?;
    info!(
        "'{}' bought {} x{} at {}",
        username, outcome.symbol, outcome.shares, outcome.executed_price
    );
    Ok(Json(outcome.into()))
}

pub async fn sell(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(username)): Extension<AuthUser>,
    Json(payload): Json<TradeRequest>,
) -> ApiResult<Json<TradeResponse>> {
    let outcome = state
        .ledger_service
        .sell(&username, &payload.symbol, payload.shares)
        .await?;
    info!(
        "'{}' sold {} x{} at {}",
        username, outcome.symbol, outcome.shares, outcome.executed_price
    );
    Ok(Json(outcome.into()))
}
