//! Embeddings generation module
//!
//! Turns free text into a fixed-length vector using an external embedding model:
//! - OpenAI-compatible endpoints (text-embedding-ada-002, text-embedding-3-small, etc.)
//! - Ollama (local models)
//!
//! # Examples
//!
//! ```rust,no_run
//! use lexsearch::config::AppConfig;
//! use lexsearch::embeddings::{Embedder, EmbeddingClient, EmbeddingConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let client = EmbeddingClient::from_config(EmbeddingConfig::from_app_config(&config)?)?;
//!
//!     let embedding = client.embed("ขอคำปรึกษาคดีแพ่ง").await?;
//!     println!("Generated embedding with {} dimensions", embedding.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;

use std::time::Duration;

use async_trait::async_trait;

pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;

use crate::errors::LexSearchError;
use crate::errors::Result;

/// Default embedding dimension for OpenAI text-embedding-ada-002
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// Anything that can turn text into an embedding vector
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text. Failures are always `LexSearchError::EmbeddingError`.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Configuration for embedding generation
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub dimension: usize,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl EmbeddingConfig {
    pub fn from_app_config(config: &crate::config::AppConfig) -> Result<Self> {
        let provider = match config.embeddings.provider.as_str() {
            "openai" => EmbeddingProvider::OpenAI,
            "ollama" => EmbeddingProvider::Ollama,
            other => {
                return Err(LexSearchError::ConfigError(format!(
                    "unknown embedding provider '{other}'"
                )))
            }
        };

        Ok(Self {
            provider,
            model: config.embedding_model().to_string(),
            dimension: config.embedding_dimension(),
            endpoint: config.embeddings.endpoint.trim_end_matches('/').to_string(),
            api_key: config.embeddings.api_key.clone(),
            timeout: Duration::from_secs(config.embeddings.timeout_secs),
        })
    }
}
