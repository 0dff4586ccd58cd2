use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexSearchError {
    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("Retrieval error: {0}")]
    RetrievalError(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LexSearchError {
    /// Whether the error belongs to the embedding stage, the only stage whose
    /// failures reach the pipeline caller.
    #[must_use]
    pub const fn is_embedding_failure(&self) -> bool {
        matches!(self, Self::EmbeddingError(_))
    }
}

pub type Result<T> = std::result::Result<T, LexSearchError>;
