use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::models::PortfolioResponse;
use crate::state::AppState;

pub async fn get_portfolio(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(username)): Extension<AuthUser>,
) -> ApiResult<Json<PortfolioResponse>> {
    let summary = state.portfolio_service.valuation(&username).await?;
    Ok(Json(summary.into()))
}
