pub mod models;
pub mod webhook;

// Re-exports
pub use models::*;

use axum::{Json, Router, routing::get};
use tower_http::trace::TraceLayer;

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full router with every endpoint mounted
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(webhook::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
