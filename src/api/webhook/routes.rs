use crate::api::models::AppState;
use crate::api::webhook::handlers::rating_webhook_handler;
use axum::{Router, routing::post};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/webhooks/ratings", post(rating_webhook_handler))
}
