//! Vector-indexed legal document store
//!
//! The store owns nearest-neighbour search; this crate only calls its match function
//! with a query vector and a match count. Two transports reach the same SQL function:
//! - [`RpcVectorStore`]: PostgREST remote procedure call over HTTPS
//! - [`PgVectorStore`]: direct PostgreSQL connection with pgvector

pub mod postgres;
pub mod rpc;

use std::sync::Arc;

use async_trait::async_trait;

pub use postgres::PgVectorStore;
pub use rpc::RpcVectorStore;

use crate::config::AppConfig;
use crate::errors::LexSearchError;
use crate::errors::Result;
use crate::models::DocumentRecord;

/// Nearest-neighbour query against the document store
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Return up to `match_count` records ordered by descending similarity
    async fn match_documents(
        &self,
        query_embedding: &[f32],
        match_count: usize,
    ) -> Result<Vec<DocumentRecord>>;
}

/// Build the store selected by `store.backend`
pub async fn from_config(config: &AppConfig) -> Result<Arc<dyn VectorStore>> {
    let store: Arc<dyn VectorStore> = match config.store.backend.as_str() {
        "rpc" => Arc::new(RpcVectorStore::from_config(&config.store)?),
        "postgres" => Arc::new(PgVectorStore::from_config(&config.store).await?),
        other => {
            return Err(LexSearchError::ConfigError(format!(
                "unknown store backend '{other}'"
            )))
        }
    };
    Ok(store)
}

/// Match function names are interpolated into URLs and SQL, so only plain identifiers pass
pub(crate) fn validate_function_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(LexSearchError::ConfigError(format!(
            "invalid match function name '{name}'"
        )))
    }
}
