use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::models::HistoryEntry;
use crate::state::AppState;

pub async fn list_history(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(username)): Extension<AuthUser>,
) -> ApiResult<Json<Vec<HistoryEntry>>> {
    let entries = state.transaction_repository.list_for_user(&username)?;
    Ok(Json(entries.into_iter().map(HistoryEntry::from).collect()))
}
