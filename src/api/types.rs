//! API request and response types

use serde::Deserialize;
use serde::Serialize;

use crate::models::LegalDocument;

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Legal document search request
#[derive(Debug, Deserialize)]
pub struct LegalSearchRequest {
    pub query: String,
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub threshold: Option<f32>,
}

/// Grounded answer request
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Deterministic citation answer request
#[derive(Debug, Deserialize)]
pub struct CiteRequest {
    pub question: String,
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub threshold: Option<f32>,
}

/// Citation answer with the documents it cites
#[derive(Debug, Serialize)]
pub struct CitationResponse {
    pub answer: String,
    pub sources: Vec<LegalDocument>,
}
