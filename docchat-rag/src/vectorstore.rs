//! Vector store trait for indexing chunks and similarity search.

use async_trait::async_trait;

use crate::document::{Chunk, SearchResult};
use crate::error::Result;

/// A storage backend for chunk embeddings with thresholded similarity search.
///
/// Implementations manage named collections of [`Chunk`]s. A collection is
/// created with a fixed dimensionality; upserting or searching with a vector
/// of any other length is an error, never a silent truncation.
///
/// # Example
///
/// ```rust,ignore
/// use docchat_rag::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.create_collection("acs-chat", 1536).await?;
/// store.upsert("acs-chat", &chunks).await?;
/// let hits = store.search("acs-chat", &query_embedding, 5, 0.3).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create a named collection with the given dimensionality.
    /// No-op if it already exists.
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()>;

    /// Delete a named collection and all its data.
    async fn delete_collection(&self, name: &str) -> Result<()>;

    /// Upsert chunks into a collection. Chunks must have embeddings set.
    async fn upsert(&self, collection: &str, chunks: &[Chunk]) -> Result<()>;

    /// Return the `top_k` chunks most similar to `embedding`, keeping only
    /// those with `score >= score_threshold` (the boundary score is kept).
    ///
    /// Results are ordered by descending similarity. May be empty.
    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
        score_threshold: f32,
    ) -> Result<Vec<SearchResult>>;
}
