//! Similarity retrieval over the document store

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use tracing::warn;

use super::with_timeout;
use crate::models::LegalDocument;
use crate::store::VectorStore;

/// Thin typed wrapper over the store's nearest-neighbour search.
///
/// Results keep the store's order; nothing is re-ranked, re-scored or deduplicated.
/// Store failures are logged and turned into an empty result.
#[derive(Clone)]
pub struct SimilarityRetriever {
    store: Arc<dyn VectorStore>,
    call_timeout: Duration,
}

impl SimilarityRetriever {
    pub fn new(store: Arc<dyn VectorStore>, call_timeout: Duration) -> Self {
        Self {
            store,
            call_timeout,
        }
    }

    /// Up to `top_k` documents nearest to `query_vector`, most similar first.
    /// `top_k` below 1 is clamped to 1.
    pub async fn retrieve(&self, query_vector: &[f32], top_k: usize) -> Vec<LegalDocument> {
        let top_k = top_k.max(1);

        let records = match with_timeout(
            self.call_timeout,
            "document store query",
            self.store.match_documents(query_vector, top_k),
        )
        .await
        {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, top_k, "Document retrieval failed, continuing without documents");
                return Vec::new();
            }
        };

        if records.len() > top_k {
            debug!(
                "Store returned {} records for top_k={}, truncating",
                records.len(),
                top_k
            );
        }

        let documents: Vec<LegalDocument> = records
            .into_iter()
            .take(top_k)
            .map(LegalDocument::from)
            .collect();

        debug!("Retrieved {} documents", documents.len());
        documents
    }

    /// Plain retrieval followed by [`filter_by_threshold`]
    pub async fn retrieve_with_threshold(
        &self,
        query_vector: &[f32],
        top_k: usize,
        threshold: f32,
    ) -> Vec<LegalDocument> {
        let documents = self.retrieve(query_vector, top_k).await;
        filter_by_threshold(documents, threshold)
    }
}

/// Keep documents with `similarity >= threshold`, preserving order.
/// Unscored documents count as similarity 0.0.
#[must_use]
pub fn filter_by_threshold(documents: Vec<LegalDocument>, threshold: f32) -> Vec<LegalDocument> {
    let before = documents.len();
    let kept: Vec<LegalDocument> = documents
        .into_iter()
        .filter(|doc| doc.score() >= threshold)
        .collect();

    if kept.len() < before {
        debug!(
            "Threshold {} dropped {} of {} documents",
            threshold,
            before - kept.len(),
            before
        );
    }
    kept
}
