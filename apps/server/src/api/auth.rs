use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use tradefolio_core::users::{NewUser, UserError};

use crate::error::{ApiError, ApiResult};
use crate::models::{usd, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::state::AppState;

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    if payload.username.trim().is_empty() {
        return Err(ApiError::BadRequest("Must provide username".to_string()));
    }
    if payload.password.is_empty() {
        return Err(ApiError::BadRequest("Must provide password".to_string()));
    }
    if payload.confirmation.is_empty() {
        return Err(ApiError::BadRequest(
            "Must provide password confirmation".to_string(),
        ));
    }
    if payload.password != payload.confirmation {
        return Err(ApiError::BadRequest("Passwords must match".to_string()));
    }

    let password_hash = state.auth.hash_password(&payload.password)?;
    let user = state.user_service.register(NewUser {
        username: payload.username,
        password_hash,
    })?;
    info!("Registered user '{}'", user.username);

    Ok(Json(RegisterResponse {
        username: user.username,
        cash: usd(user.cash),
    }))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    // A missing user and a bad password answer identically
    let user = state
        .user_service
        .get_user(&payload.username)
        .map_err(|e| match e {
            UserError::NotFound(_) => {
                ApiError::Unauthorized("Invalid username or password".to_string())
            }
            other => ApiError::User(other),
        })?;

    state
        .auth
        .verify_password(&user.password_hash, &payload.password)?;
    let access_token = state.auth.issue_token(&user.username)?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth.token_ttl().as_secs(),
    }))
}
