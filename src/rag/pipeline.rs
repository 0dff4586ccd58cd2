//! Complete legal RAG pipeline: Embed -> Retrieve -> Filter -> Synthesize

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::instrument;

use super::generate_enhanced_answer;
use super::with_timeout;
use super::AnswerOutcome;
use super::AnswerSynthesizer;
use super::SimilarityRetriever;
use super::DEFAULT_SIMILARITY_THRESHOLD;
use super::DEFAULT_TOP_K;
use crate::config::AppConfig;
use crate::embeddings::Embedder;
use crate::embeddings::EmbeddingClient;
use crate::embeddings::EmbeddingConfig;
use crate::errors::LexSearchError;
use crate::errors::Result;
use crate::llm::Generator;
use crate::llm::LlmService;
use crate::models::LegalDocument;
use crate::store::VectorStore;

/// Threshold used by grounded answers: every retrieved document is kept
pub const ANSWER_THRESHOLD: f32 = f32::NEG_INFINITY;

/// Tunables for one pipeline
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub top_k: usize,
    pub threshold: f32,
    pub temperature: f32,
    pub max_tokens: u32,
    /// When set, embeddings of any other length are rejected
    pub embedding_dimension: Option<usize>,
    pub embed_timeout: Duration,
    pub retrieval_timeout: Duration,
    pub synthesis_timeout: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            temperature: 0.1,
            max_tokens: 500,
            embedding_dimension: None,
            embed_timeout: Duration::from_secs(30),
            retrieval_timeout: Duration::from_secs(30),
            synthesis_timeout: Duration::from_secs(60),
        }
    }
}

impl PipelineOptions {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            top_k: config.search.top_k,
            threshold: config.search.threshold,
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
            embedding_dimension: Some(config.embedding_dimension()),
            embed_timeout: Duration::from_secs(config.embeddings.timeout_secs),
            retrieval_timeout: Duration::from_secs(config.store.timeout_secs),
            synthesis_timeout: Duration::from_secs(config.llm.timeout_secs),
        }
    }
}

/// Grounded answer together with the documents it was built from
#[derive(Debug, Clone, Serialize)]
pub struct LegalAnswer {
    pub answer: String,
    pub outcome: AnswerOutcome,
    pub sources: Vec<LegalDocument>,
}

/// Stateless, reentrant question-answering pipeline over injected capabilities
#[derive(Clone)]
pub struct LegalSearchPipeline {
    embedder: Arc<dyn Embedder>,
    retriever: SimilarityRetriever,
    synthesizer: AnswerSynthesizer,
    options: PipelineOptions,
}

impl LegalSearchPipeline {
    /// Assemble a pipeline from explicit capabilities
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        generator: Arc<dyn Generator>,
        options: PipelineOptions,
    ) -> Self {
        let retriever = SimilarityRetriever::new(store, options.retrieval_timeout);
        let synthesizer = AnswerSynthesizer::new(
            generator,
            options.temperature,
            options.max_tokens,
            options.synthesis_timeout,
        );

        Self {
            embedder,
            retriever,
            synthesizer,
            options,
        }
    }

    /// Build the HTTP/database-backed capabilities described by `config`
    ///
    /// # Errors
    /// - Invalid embedding provider or store backend
    /// - HTTP client build errors
    /// - Database connection errors for the `postgres` backend
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let embedder = Arc::new(EmbeddingClient::from_config(
            EmbeddingConfig::from_app_config(config)?,
        )?);
        let store = crate::store::from_config(config).await?;
        let generator = Arc::new(LlmService::new(config)?);

        info!(
            "Pipeline ready: embeddings={} store={} llm={}",
            config.embedding_model(),
            config.store.backend,
            config.llm_model()
        );

        Ok(Self::new(
            embedder,
            store,
            generator,
            PipelineOptions::from_app_config(config),
        ))
    }

    pub const fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Embed `text`. Every failure, including a timeout or a vector of the wrong
    /// length, is reported as `LexSearchError::EmbeddingError`.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let vector = with_timeout(
            self.options.embed_timeout,
            "embedding request",
            self.embedder.embed(text),
        )
        .await
        .map_err(|e| match e {
            LexSearchError::EmbeddingError(_) => e,
            other => LexSearchError::EmbeddingError(other.to_string()),
        })?;

        if let Some(expected) = self.options.embedding_dimension {
            if vector.len() != expected {
                return Err(LexSearchError::EmbeddingError(format!(
                    "Expected {expected} dimensions, got {}",
                    vector.len()
                )));
            }
        }

        Ok(vector)
    }

    /// See [`SimilarityRetriever::retrieve`]
    pub async fn retrieve(&self, query_vector: &[f32], top_k: usize) -> Vec<LegalDocument> {
        self.retriever.retrieve(query_vector, top_k).await
    }

    /// See [`SimilarityRetriever::retrieve_with_threshold`]
    pub async fn retrieve_with_threshold(
        &self,
        query_vector: &[f32],
        top_k: usize,
        threshold: f32,
    ) -> Vec<LegalDocument> {
        self.retriever
            .retrieve_with_threshold(query_vector, top_k, threshold)
            .await
    }

    /// Embed `query` and run thresholded retrieval, falling back to the configured
    /// `top_k` and threshold
    #[instrument(skip(self), fields(query_len = query.len()))]
    pub async fn search(
        &self,
        query: &str,
        top_k: Option<usize>,
        threshold: Option<f32>,
    ) -> Result<Vec<LegalDocument>> {
        let vector = self.embed(query).await?;
        Ok(self
            .retrieve_with_threshold(
                &vector,
                top_k.unwrap_or(self.options.top_k),
                threshold.unwrap_or(self.options.threshold),
            )
            .await)
    }

    /// Grounded answer text. Only embedding failures are returned as errors; the result
    /// is otherwise a model answer or one of the two fixed fallback messages.
    pub async fn answer_question(&self, question: &str) -> Result<String> {
        Ok(self.answer_with_sources(question).await?.answer)
    }

    /// Grounded answer with its sources and how it was produced
    #[instrument(skip(self), fields(question_len = question.len()))]
    pub async fn answer_with_sources(&self, question: &str) -> Result<LegalAnswer> {
        info!("Processing legal question");

        let vector = self.embed(question).await?;
        let sources = self
            .retrieve_with_threshold(&vector, self.options.top_k, ANSWER_THRESHOLD)
            .await;
        debug!("Grounding answer on {} documents", sources.len());

        let (answer, outcome) = self.synthesizer.synthesize(question, &sources).await;
        info!(?outcome, "Legal question processed");

        Ok(LegalAnswer {
            answer,
            outcome,
            sources,
        })
    }

    /// Search and format the hits as a deterministic citation answer
    pub async fn citation_answer(
        &self,
        question: &str,
        top_k: Option<usize>,
        threshold: Option<f32>,
    ) -> Result<String> {
        let documents = self.search(question, top_k, threshold).await?;
        Ok(generate_enhanced_answer(question, &documents))
    }
}
