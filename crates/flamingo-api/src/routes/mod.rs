//! API route handlers

pub mod health;
pub mod node;
pub mod session;
pub mod swap;

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{routing::get, Router};

use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/node", node::router())
        .nest("/swap", swap::router())
        .nest("/session", session::router())
        .with_state(state)
}

/// Wall clock in milliseconds since the Unix epoch
pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
