pub mod aggregator;
pub mod models;

pub use aggregator::RatingAggregator;
pub use models::{RatingEvent, RatingStats, RecipeId, RecipeStats};

use crate::storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
