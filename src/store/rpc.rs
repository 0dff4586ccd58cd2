//! PostgREST remote procedure call transport

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::validate_function_name;
use super::VectorStore;
use crate::config::StoreConfig;
use crate::errors::LexSearchError;
use crate::errors::Result;
use crate::models::DocumentRecord;

/// Calls `POST {url}/rest/v1/rpc/{function}` with the query vector
pub struct RpcVectorStore {
    url: String,
    api_key: Option<String>,
    client: Client,
}

impl RpcVectorStore {
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        validate_function_name(&config.function)?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LexSearchError::HttpError(e.to_string()))?;

        Ok(Self {
            url: format!(
                "{}/rest/v1/rpc/{}",
                config.url.trim_end_matches('/'),
                config.function
            ),
            api_key: config.api_key.clone(),
            client,
        })
    }

    /// Full URL of the match procedure
    pub fn rpc_url(&self) -> &str {
        &self.url
    }
}

#[derive(Serialize)]
struct MatchRequest<'a> {
    query_embedding: &'a [f32],
    match_count: usize,
}

#[async_trait]
impl VectorStore for RpcVectorStore {
    async fn match_documents(
        &self,
        query_embedding: &[f32],
        match_count: usize,
    ) -> Result<Vec<DocumentRecord>> {
        debug!("Calling match RPC: {} (match_count={})", self.url, match_count);

        let mut builder = self.client.post(&self.url).json(&MatchRequest {
            query_embedding,
            match_count,
        });
        if let Some(api_key) = &self.api_key {
            builder = builder.header("apikey", api_key).bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| LexSearchError::RetrievalError(format!("RPC request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LexSearchError::RetrievalError(format!(
                "Store RPC error ({status}): {error_text}"
            )));
        }

        response.json::<Vec<DocumentRecord>>().await.map_err(|e| {
            LexSearchError::RetrievalError(format!("Failed to parse RPC response: {e}"))
        })
    }
}
