use super::{RatingStore, StoreError};
use crate::config::{StoreCredentials, TableConfig};
use crate::ratings::RecipeStats;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;

const REST_PREFIX: &str = "rest/v1";
const UPSERT_PREFERENCE: &str = "resolution=merge-duplicates,return=minimal";

#[derive(Debug, Deserialize)]
struct RatingRow {
    rating: f64,
}

/// Store backed by a Supabase project's PostgREST endpoint
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    service_key: String,
    tables: TableConfig,
}

impl SupabaseStore {
    pub fn new(credentials: &StoreCredentials, tables: &TableConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .build()
            .map_err(|e| StoreError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: credentials.url.clone(),
            service_key: credentials.service_key.clone(),
            tables: tables.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PREFIX, table)
    }
}

#[async_trait]
impl RatingStore for SupabaseStore {
    async fn fetch_ratings(&self, recipe_id: &str) -> Result<Vec<f64>, StoreError> {
        let filter = format!("eq.{}", recipe_id);

        let response = self
            .client
            .get(self.table_url(&self.tables.ratings))
            .query(&[("select", "rating"), ("recipe_id", filter.as_str())])
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        let rows: Vec<RatingRow> = ensure_success(response).await?.json().await?;
        debug!(recipe_id, rows = rows.len(), "Fetched ratings");

        Ok(rows.into_iter().map(|row| row.rating).collect())
    }

    async fn upsert_stats(&self, row: &RecipeStats) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.table_url(&self.tables.stats))
            .query(&[("on_conflict", "recipe_id")])
            .header("apikey", &self.service_key)
            .header("Prefer", UPSERT_PREFERENCE)
            .bearer_auth(&self.service_key)
            .json(row)
            .send()
            .await?;

        ensure_success(response).await?;
        debug!(recipe_id = %row.recipe_id, "Upserted stats row");

        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        message,
    })
}
