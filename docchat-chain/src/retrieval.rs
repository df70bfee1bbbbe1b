//! The retrieval gate: embed the query, search the index, decide whether
//! the evidence is usable.

use std::sync::Arc;

use tracing::{debug, warn};

use docchat_rag::{EmbeddingProvider, SearchResult, VectorStore};

/// The gate's verdict on one retrieval attempt.
///
/// `NoEvidence` covers every way of coming up empty — embedder failure,
/// store failure, or simply no passage above the threshold. The caller
/// cannot (and must not) distinguish them; the sub-cause is logged here.
#[derive(Debug)]
pub enum RetrievalOutcome {
    /// At least one passage cleared the threshold, best first.
    Evidence(Vec<SearchResult>),
    /// Nothing usable was retrieved.
    NoEvidence,
}

/// Orchestrates the embedder and the vector store for one query.
///
/// Fail-soft by contract: no failure in embedding or search escapes this
/// type; each degrades to [`RetrievalOutcome::NoEvidence`].
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    collection: String,
}

impl Retriever {
    /// Create a retriever over the given clients and collection.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        collection: impl Into<String>,
    ) -> Self {
        Self { embedder, store, collection: collection.into() }
    }

    /// The collection this retriever searches.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Embed `query` and search for passages scoring at least `threshold`.
    ///
    /// An embedder failure short-circuits: the store is not called. A store
    /// failure is treated as an empty result. An empty result, whatever the
    /// cause, is [`RetrievalOutcome::NoEvidence`].
    pub async fn retrieve(&self, query: &str, top_k: usize, threshold: f32) -> RetrievalOutcome {
        let embedding = match self.embedder.embed(query).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!(error = %e, "query embedding failed, treating as no evidence");
                return RetrievalOutcome::NoEvidence;
            }
        };

        let passages = match self
            .store
            .search(&self.collection, &embedding, top_k, threshold)
            .await
        {
            Ok(passages) => passages,
            Err(e) => {
                warn!(collection = %self.collection, error = %e,
                    "vector search failed, treating as no evidence");
                Vec::new()
            }
        };

        if passages.is_empty() {
            debug!(collection = %self.collection, threshold, "no passages above threshold");
            return RetrievalOutcome::NoEvidence;
        }

        debug!(collection = %self.collection, passage_count = passages.len(), "retrieved evidence");
        RetrievalOutcome::Evidence(passages)
    }
}
