//! Embedding API clients for various providers

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::Embedder;
use super::EmbeddingConfig;
use crate::errors::LexSearchError;
use crate::errors::Result;

/// Supported embedding providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProvider {
    /// `OpenAI` embeddings API
    OpenAI,
    /// Ollama local embeddings
    Ollama,
}

/// Client for generating embeddings from various providers
pub struct EmbeddingClient {
    provider: EmbeddingProvider,
    model: String,
    endpoint: String,
    api_key: Option<String>,
    dimension: usize,
    client: Client,
}

impl EmbeddingClient {
    /// Create a new embedding client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    /// - `OpenAI` provider configured without an API key
    pub fn from_config(config: EmbeddingConfig) -> Result<Self> {
        if config.provider == EmbeddingProvider::OpenAI && config.api_key.is_none() {
            return Err(LexSearchError::ConfigError(
                "OpenAI API key not provided".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| LexSearchError::HttpError(e.to_string()))?;

        Ok(Self {
            provider: config.provider,
            model: config.model,
            endpoint: config.endpoint,
            api_key: config.api_key,
            dimension: config.dimension,
            client,
        })
    }

    /// Expected output dimensionality
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Generate embedding for a single text
    ///
    /// # Errors
    /// - API request failures (network errors, timeouts, authentication failures)
    /// - Invalid API responses (malformed JSON, missing embedding, wrong dimensions)
    pub async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = match self.provider {
            EmbeddingProvider::OpenAI => self.generate_openai(text).await?,
            EmbeddingProvider::Ollama => self.generate_ollama(text).await?,
        };

        if embedding.len() != self.dimension {
            return Err(LexSearchError::EmbeddingError(format!(
                "Expected {} dimensions from model {}, got {}",
                self.dimension,
                self.model,
                embedding.len()
            )));
        }

        Ok(embedding)
    }

    /// Generate embedding using `OpenAI` API
    async fn generate_openai(&self, text: &str) -> Result<Vec<f32>> {
        #[derive(Serialize)]
        struct OpenAIRequest<'a> {
            model: &'a str,
            input: &'a str,
        }

        #[derive(Deserialize)]
        struct OpenAIResponse {
            data: Vec<EmbeddingData>,
        }

        #[derive(Deserialize)]
        struct EmbeddingData {
            embedding: Vec<f32>,
        }

        let url = format!("{}/embeddings", self.endpoint);
        debug!("Calling OpenAI embeddings API: {}", url);

        let request = OpenAIRequest {
            model: &self.model,
            input: text,
        };

        let mut builder = self.client.post(&url).json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| LexSearchError::EmbeddingError(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LexSearchError::EmbeddingError(format!(
                "OpenAI API error ({status}): {error_text}"
            )));
        }

        let result: OpenAIResponse = response.json().await.map_err(|e| {
            LexSearchError::EmbeddingError(format!("Failed to parse response: {e}"))
        })?;

        result
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| LexSearchError::EmbeddingError("No embedding in response".to_string()))
    }

    /// Generate embedding using Ollama API
    async fn generate_ollama(&self, text: &str) -> Result<Vec<f32>> {
        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            prompt: &'a str,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            embedding: Vec<f32>,
        }

        let url = format!("{}/api/embeddings", self.endpoint);
        debug!("Calling Ollama embeddings API: {}", url);

        let request = OllamaRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LexSearchError::EmbeddingError(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LexSearchError::EmbeddingError(format!(
                "Ollama API error ({status}): {error_text}"
            )));
        }

        let result: OllamaResponse = response.json().await.map_err(|e| {
            LexSearchError::EmbeddingError(format!("Failed to parse response: {e}"))
        })?;

        Ok(result.embedding)
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.generate(text).await
    }
}
