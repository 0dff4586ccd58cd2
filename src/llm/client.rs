//! OpenAI-compatible chat completions client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::ChatMessage;
use super::ChatRequest;
use super::Generator;
use crate::config::AppConfig;
use crate::errors::LexSearchError;
use crate::errors::Result;

/// Chat completions client
#[derive(Clone)]
pub struct LlmService {
    endpoint: String,
    api_key: String,
    model: String,
    client: Client,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl LlmService {
    /// Create a new LLM service from the `[llm]` config section
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::with_timeout(
            config.llm_endpoint(),
            config.llm_key(),
            config.llm_model(),
            Duration::from_secs(config.llm.timeout_secs),
        )
    }

    pub fn with_timeout(
        endpoint: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LexSearchError::HttpError(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            client,
        })
    }

    /// Send a chat completion and return the first choice's content
    pub async fn chat(&self, request: &ChatRequest) -> Result<Option<String>> {
        let url = format!("{}/chat/completions", self.endpoint);
        debug!(
            "Calling chat completions API: {} (model={}, max_tokens={})",
            url, self.model, request.max_tokens
        );

        let body = CompletionRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let mut builder = self.client.post(&url).json(&body);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| LexSearchError::LlmError(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LexSearchError::LlmError(format!(
                "Chat API error ({status}): {error_text}"
            )));
        }

        let result: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LexSearchError::LlmError(format!("Failed to parse response: {e}")))?;

        Ok(first_content(result))
    }
}

fn first_content(response: CompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|content| !content.trim().is_empty())
}

#[async_trait]
impl Generator for LlmService {
    async fn generate(&self, request: &ChatRequest) -> Result<Option<String>> {
        self.chat(request).await
    }
}
