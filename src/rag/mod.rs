//! RAG (Retrieval-Augmented Generation) module
//!
//! End-to-end legal question answering:
//! - Semantic retrieval of legal passages using vector embeddings
//! - Similarity threshold filtering
//! - Grounded answer generation with section citations
//! - Deterministic citation answers without a model call
//!
//! # Examples
//!
//! ```rust,no_run
//! use lexsearch::config::AppConfig;
//! use lexsearch::rag::LegalSearchPipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let pipeline = LegalSearchPipeline::from_config(&config).await?;
//!
//!     let answer = pipeline.answer_question("ขอคำปรึกษาคดีแพ่ง").await?;
//!     println!("Answer: {answer}");
//!
//!     Ok(())
//! }
//! ```

pub mod pipeline;
pub mod prompts;
pub mod retriever;
pub mod synthesizer;

use std::future::Future;
use std::time::Duration;

pub use pipeline::LegalAnswer;
pub use pipeline::LegalSearchPipeline;
pub use pipeline::PipelineOptions;
pub use prompts::ANSWER_ERROR_MESSAGE;
pub use prompts::NO_RELEVANT_INFO_MESSAGE;
pub use retriever::filter_by_threshold;
pub use retriever::SimilarityRetriever;
pub use synthesizer::generate_enhanced_answer;
pub use synthesizer::AnswerOutcome;
pub use synthesizer::AnswerSynthesizer;

use crate::errors::LexSearchError;
use crate::errors::Result;

/// Number of documents requested from the store when the caller does not say
pub const DEFAULT_TOP_K: usize = 3;

/// Minimum similarity kept by thresholded retrieval when the caller does not say
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.1;

/// Bound an external call; elapsed calls become `LexSearchError::Timeout`
pub(crate) async fn with_timeout<T, F>(limit: Duration, what: &str, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or_else(|_| Err(LexSearchError::Timeout(format!("{what} exceeded {limit:?}"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_timeout_passes_result_through() {
        let value = with_timeout(Duration::from_secs(1), "noop", async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_elapses() {
        let result: Result<()> = with_timeout(Duration::from_millis(50), "slow call", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(())
        })
        .await;
        match result {
            Err(LexSearchError::Timeout(msg)) => assert!(msg.starts_with("slow call")),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
