//! Embedding provider trait for turning text into query/index vectors.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that maps text to fixed-length embedding vectors.
///
/// Implementations wrap a specific embedding backend behind a unified async
/// interface. The default [`embed_batch`](EmbeddingProvider::embed_batch)
/// calls [`embed`](EmbeddingProvider::embed) sequentially; backends with
/// native batching should override it.
///
/// Every vector produced by one provider has exactly
/// [`dimensions()`](EmbeddingProvider::dimensions) components — stores reject
/// vectors of any other length rather than truncating them.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// The dimensionality of vectors produced by this provider.
    fn dimensions(&self) -> usize;
}
