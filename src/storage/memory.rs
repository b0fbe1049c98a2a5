use super::{RatingStore, StoreError};
use crate::ratings::RecipeStats;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-process store double for tests
#[derive(Default)]
pub struct MemoryStore {
    ratings: Mutex<HashMap<String, Vec<f64>>>,
    stats: Mutex<HashMap<String, RecipeStats>>,
    upserts: Mutex<usize>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ratings(self, recipe_id: &str, ratings: &[f64]) -> Self {
        self.ratings
            .lock()
            .unwrap()
            .insert(recipe_id.to_string(), ratings.to_vec());
        self
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn stats_for(&self, recipe_id: &str) -> Option<RecipeStats> {
        self.stats.lock().unwrap().get(recipe_id).cloned()
    }

    pub fn upsert_count(&self) -> usize {
        *self.upserts.lock().unwrap()
    }
}

#[async_trait]
impl RatingStore for MemoryStore {
    async fn fetch_ratings(&self, recipe_id: &str) -> Result<Vec<f64>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Request("connection refused".to_string()));
        }
        Ok(self
            .ratings
            .lock()
            .unwrap()
            .get(recipe_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn upsert_stats(&self, row: &RecipeStats) -> Result<(), StoreError> {
        *self.upserts.lock().unwrap() += 1;
        if self.fail_writes {
            return Err(StoreError::Status {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        self.stats
            .lock()
            .unwrap()
            .insert(row.recipe_id.clone(), row.clone());
        Ok(())
    }
}
