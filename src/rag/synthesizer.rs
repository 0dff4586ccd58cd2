//! Answer synthesis from retrieved legal documents

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;
use tracing::error;
use tracing::warn;

use super::prompts::LegalPrompts;
use super::prompts::ANSWER_ERROR_MESSAGE;
use super::prompts::NO_RELEVANT_INFO_MESSAGE;
use super::with_timeout;
use crate::llm::ChatRequest;
use crate::llm::Generator;
use crate::models::LegalDocument;

/// How an answer was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// The model answered from the retrieved documents
    Answered,
    /// Retrieval returned nothing; the model was not called
    NoRelevantDocuments,
    /// The model call failed or returned no content
    SynthesisFailed,
}

/// Model-grounded answers. Never fails: errors become [`ANSWER_ERROR_MESSAGE`].
#[derive(Clone)]
pub struct AnswerSynthesizer {
    generator: Arc<dyn Generator>,
    temperature: f32,
    max_tokens: u32,
    call_timeout: Duration,
}

impl AnswerSynthesizer {
    pub fn new(
        generator: Arc<dyn Generator>,
        temperature: f32,
        max_tokens: u32,
        call_timeout: Duration,
    ) -> Self {
        Self {
            generator,
            temperature,
            max_tokens,
            call_timeout,
        }
    }

    /// Answer `question` from `documents`, which are used in the order given
    pub async fn synthesize(
        &self,
        question: &str,
        documents: &[LegalDocument],
    ) -> (String, AnswerOutcome) {
        if documents.is_empty() {
            debug!("No documents to ground an answer on");
            return (
                NO_RELEVANT_INFO_MESSAGE.to_string(),
                AnswerOutcome::NoRelevantDocuments,
            );
        }

        let context = build_context(documents);
        let prompt = LegalPrompts::render_grounded_answer(question, &context);
        tracing::trace!("=== LLM PROMPT ===\n{}\n=== END PROMPT ===", prompt);

        let request = ChatRequest::single_prompt(prompt, self.temperature, self.max_tokens);
        match with_timeout(
            self.call_timeout,
            "answer generation",
            self.generator.generate(&request),
        )
        .await
        {
            Ok(Some(answer)) => (answer, AnswerOutcome::Answered),
            Ok(None) => {
                warn!("Model returned no content for a grounded answer");
                (
                    ANSWER_ERROR_MESSAGE.to_string(),
                    AnswerOutcome::SynthesisFailed,
                )
            }
            Err(e) => {
                error!(error = %e, documents = documents.len(), "Answer generation failed");
                (
                    ANSWER_ERROR_MESSAGE.to_string(),
                    AnswerOutcome::SynthesisFailed,
                )
            }
        }
    }
}

/// Document contents in order, separated by a blank line
#[must_use]
pub fn build_context(documents: &[LegalDocument]) -> String {
    documents
        .iter()
        .map(|doc| doc.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Deterministic citation answer, no model call.
///
/// One `"<law_type> section <section>: <content>"` line per document in the order
/// given, separated by blank lines. Whitespace runs inside content are collapsed so
/// each citation stays on one line. Empty input gives an empty string.
#[must_use]
pub fn generate_enhanced_answer(question: &str, documents: &[LegalDocument]) -> String {
    debug!(
        "Building citation answer for '{}' from {} documents",
        question,
        documents.len()
    );

    documents
        .iter()
        .map(|doc| {
            format!(
                "{} section {}: {}",
                doc.law_type,
                doc.section,
                collapse_whitespace(&doc.content)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}
