pub mod auth;
pub mod history;
pub mod ledger;
pub mod portfolio;
pub mod quote;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::require_auth;
use crate::config::Config;
use crate::state::AppState;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let public = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    let protected = Router::new()
        .route("/quote/{symbol}", get(quote::get_quote))
        .route("/ledger/buy", post(ledger::buy))
        .route("/ledger/sell", post(ledger::sell))
        .route("/portfolio", get(portfolio::get_portfolio))
        .route("/history", get(history::list_history))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .nest("/api/v1", public.merge(protected))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
