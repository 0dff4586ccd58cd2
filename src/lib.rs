//! Semantic legal-document search and grounded answer pipeline.
//!
//! Query text is embedded, matched against a vector-indexed store of legal
//! passages, filtered by similarity and turned into an answer that cites the
//! sections it relies on.

pub mod api;
pub mod cli;
pub mod config;
pub mod embeddings;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;
pub mod store;

pub use config::AppConfig;
pub use errors::*;
pub use models::LegalDocument;
pub use rag::LegalSearchPipeline;
