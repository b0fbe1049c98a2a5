use super::{AggregateError, RatingEvent, RatingStats, RecipeId, RecipeStats};
use crate::storage::RatingStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

/// Recomputes and persists the stats row for one recipe per rating event
#[derive(Clone)]
pub struct RatingAggregator {
    store: Arc<dyn RatingStore>,
}

impl RatingAggregator {
    pub fn new(store: Arc<dyn RatingStore>) -> Self {
        Self { store }
    }

    /// Fetch every rating value recorded for the recipe.
    pub async fn fetch_ratings(&self, recipe_id: &RecipeId) -> Result<Vec<f64>, AggregateError> {
        self.store
            .fetch_ratings(recipe_id.as_str())
            .await
            .map_err(|e| {
                error!(recipe_id = %recipe_id, error = %e, "Failed to fetch ratings");
                AggregateError::from(e)
            })
    }

    /// Overwrite the stats row keyed by `recipe_id`, returning the row written.
    pub async fn persist_stats(
        &self,
        recipe_id: &RecipeId,
        stats: &RatingStats,
    ) -> Result<RecipeStats, AggregateError> {
        let row = RecipeStats::new(recipe_id, stats);
        self.store.upsert_stats(&row).await.map_err(|e| {
            error!(recipe_id = %recipe_id, error = %e, "Failed to persist recipe stats");
            AggregateError::from(e)
        })?;
        Ok(row)
    }

    /// Recompute the stats for the recipe named in the event and store them.
    ///
    /// A read failure aborts before anything is written.
    pub async fn on_rating_event(&self, event: &RatingEvent) -> Result<RecipeStats, AggregateError> {
        let recipe_id = event.recipe_id().map_err(|e| {
            error!(error = %e, "Rejected rating event");
            e
        })?;

        let ratings = self.fetch_ratings(&recipe_id).await?;
        let stats = compute_stats(&ratings);
        let row = self.persist_stats(&recipe_id, &stats).await?;

        info!(
            recipe_id = %recipe_id,
            average_rating = row.average_rating,
            total_reviews = row.total_reviews,
            "Recipe stats updated"
        );

        Ok(row)
    }
}

/// Reduce ratings to their mean (one decimal place) and count.
///
/// An empty slice yields zeroes. `last_updated` is always the current time.
pub fn compute_stats(ratings: &[f64]) -> RatingStats {
    let last_updated = Utc::now();

    if ratings.is_empty() {
        return RatingStats {
            average_rating: 0.0,
            total_reviews: 0,
            last_updated,
        };
    }

    let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;

    RatingStats {
        average_rating: round_one_decimal(mean),
        total_reviews: ratings.len() as u64,
        last_updated,
    }
}

// Rounds the exact binary value, ties to even: 4.25 -> 4.2, 87/20 (4.3499..) -> 4.3.
fn round_one_decimal(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}
