//! Generative model access for grounded answers

pub mod client;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

pub use client::LlmService;

use crate::errors::Result;

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Sampling parameters and messages for one completion
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Single user-turn request
    pub fn single_prompt(prompt: impl Into<String>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            messages: vec![ChatMessage::user(prompt)],
            temperature,
            max_tokens,
        }
    }
}

/// Anything that can complete a chat request
#[async_trait]
pub trait Generator: Send + Sync {
    /// Content of the first choice, `None` when the model produced none
    async fn generate(&self, request: &ChatRequest) -> Result<Option<String>>;
}
