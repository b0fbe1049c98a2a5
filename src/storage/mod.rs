#[cfg(test)]
pub mod memory;
pub mod supabase;

pub use supabase::SupabaseStore;

use crate::ratings::RecipeStats;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to build store client: {0}")]
    Client(String),

    #[error("store request failed: {0}")]
    Request(String),

    #[error("store returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected store response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Request(err.to_string())
        }
    }
}

/// Backing store holding the raw ratings and the derived stats rows
#[async_trait]
pub trait RatingStore: Send + Sync {
    /// All rating values recorded for `recipe_id`, in store order.
    async fn fetch_ratings(&self, recipe_id: &str) -> Result<Vec<f64>, StoreError>;

    /// Insert or replace the stats row keyed by `row.recipe_id`.
    async fn upsert_stats(&self, row: &RecipeStats) -> Result<(), StoreError>;
}
