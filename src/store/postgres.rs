//! Direct PostgreSQL transport using pgvector

use std::time::Duration;

use async_trait::async_trait;
use pgvector::Vector;
use serde_json::Value;
use sqlx::PgPool;

use super::validate_function_name;
use super::VectorStore;
use crate::config::StoreConfig;
use crate::errors::LexSearchError;
use crate::errors::Result;
use crate::models::DocumentRecord;

/// Calls the match function inside PostgreSQL.
///
/// Each returned row is read as JSON and decoded like an RPC row, so the function
/// may name its category column `law_type` or `lawType`, use any id type and leave
/// columns out.
#[derive(Debug, Clone)]
pub struct PgVectorStore {
    pool: PgPool,
    query: String,
}

impl PgVectorStore {
    pub fn new(pool: PgPool, function: &str) -> Result<Self> {
        validate_function_name(function)?;
        Ok(Self {
            pool,
            query: match_query(function),
        })
    }

    /// Create a pool from configuration and wrap it
    pub async fn from_config(config: &StoreConfig) -> Result<Self> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.timeout_secs))
            .connect(&config.url)
            .await?;

        tracing::info!(
            "Document store pool configured: max_connections={}",
            config.max_connections
        );

        Self::new(pool, &config.function)
    }
}

fn match_query(function: &str) -> String {
    format!("SELECT to_jsonb(m) AS doc FROM {function}($1::vector, $2) AS m")
}

/// The match function takes an `int`; larger counts saturate
fn match_count_param(match_count: usize) -> i32 {
    i32::try_from(match_count).unwrap_or(i32::MAX)
}

fn decode_row(row: Value) -> Result<DocumentRecord> {
    serde_json::from_value(row)
        .map_err(|e| LexSearchError::RetrievalError(format!("Malformed match row: {e}")))
}

#[async_trait]
impl VectorStore for PgVectorStore {
    async fn match_documents(
        &self,
        query_embedding: &[f32],
        match_count: usize,
    ) -> Result<Vec<DocumentRecord>> {
        let rows: Vec<Value> = sqlx::query_scalar(&self.query)
            .bind(Vector::from(query_embedding.to_vec()))
            .bind(match_count_param(match_count))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| LexSearchError::RetrievalError(format!("Match query failed: {e}")))?;

        rows.into_iter().map(decode_row).collect()
    }
}
