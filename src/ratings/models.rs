use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::AggregateError;

/// Non-empty recipe identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn parse(raw: &str) -> Result<Self, AggregateError> {
        if raw.trim().is_empty() {
            return Err(AggregateError::Validation(
                "recipe_id cannot be empty".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Webhook payload emitted by the store when a rating row changes.
///
/// Only `record` is read; `type`, `table`, `old_record` and friends are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingEvent {
    #[serde(default)]
    pub record: Option<Value>,
}

impl RatingEvent {
    /// Pull the recipe identifier out of `record.recipe_id` (or `record.recipeId`).
    pub fn recipe_id(&self) -> Result<RecipeId, AggregateError> {
        let record = self
            .record
            .as_ref()
            .and_then(Value::as_object)
            .ok_or_else(|| AggregateError::Validation("missing record in payload".to_string()))?;

        let raw = record
            .get("recipe_id")
            .or_else(|| record.get("recipeId"))
            .and_then(Value::as_str)
            .ok_or_else(|| AggregateError::Validation("missing recipe_id in payload".to_string()))?;

        RecipeId::parse(raw)
    }
}

/// Aggregate computed from one recipe's ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingStats {
    pub average_rating: f64,
    pub total_reviews: u64,
    pub last_updated: DateTime<Utc>,
}

/// Row written to the stats table, keyed by `recipe_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeStats {
    pub recipe_id: String,
    pub average_rating: f64,
    pub total_reviews: u64,
    pub last_updated: DateTime<Utc>,
}

impl RecipeStats {
    pub fn new(recipe_id: &RecipeId, stats: &RatingStats) -> Self {
        Self {
            recipe_id: recipe_id.as_str().to_string(),
            average_rating: stats.average_rating,
            total_reviews: stats.total_reviews,
            last_updated: stats.last_updated,
        }
    }
}
