use crate::api::models::*;
use crate::ratings::{RatingEvent, RecipeStats};
use axum::{Json, extract::State};
use tracing::info;

pub async fn rating_webhook_handler(
    State(state): State<AppState>,
    Json(event): Json<RatingEvent>,
) -> Result<Json<RecipeStats>, AppError> {
    info!("Rating event received");

    let row = state.aggregator.on_rating_event(&event).await?;

    Ok(Json(row))
}
