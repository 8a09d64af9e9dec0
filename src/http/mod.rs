//! HTTP surface of the proxy.

use axum::{Router, http::StatusCode, middleware::from_fn_with_state, routing::get};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;

pub mod auth;
pub mod middleware;
mod riot;
mod state;
mod validation;

pub use state::AppState;

async fn health() -> &'static str {
    "ok"
}

/// Mount every route and wrap them in the shared layers.
pub fn router(state: AppState, config: &Config) -> Router {
    let app = Router::new()
        .merge(riot::routes())
        .merge(auth::routes())
        .route("/health", get(health))
        .layer(from_fn_with_state(state.clone(), middleware::rate_limit))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(middleware::cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http());

    middleware::security_headers(app, config.production)
}
