//! In-memory vector store using cosine similarity.
//!
//! [`InMemoryVectorStore`] keeps collections in a `HashMap` behind a
//! `tokio::sync::RwLock`. It is the store used in development and tests;
//! production deployments use the Qdrant backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

struct Collection {
    dimensions: usize,
    chunks: HashMap<String, Chunk>,
}

/// An in-memory vector store using cosine similarity for search.
///
/// Each collection records the dimensionality it was created with; vectors
/// of any other length are rejected on upsert and search.
#[derive(Default)]
pub struct InMemoryVectorStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryVectorStore {
    /// Create a new empty in-memory vector store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Cosine similarity of two equal-length vectors; 0.0 if either is all zero.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

fn dimension_error(expected: usize, got: usize) -> RagError {
    RagError::Store {
        backend: "InMemory".to_string(),
        message: format!("vector has {got} dimensions, collection expects {expected}"),
    }
}

fn missing_collection(name: &str) -> RagError {
    RagError::Store {
        backend: "InMemory".to_string(),
        message: format!("collection '{name}' does not exist"),
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections
            .entry(name.to_string())
            .or_insert_with(|| Collection { dimensions, chunks: HashMap::new() });
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections.remove(name);
        Ok(())
    }

    async fn upsert(&self, collection: &str, chunks: &[Chunk]) -> Result<()> {
        let mut collections = self.collections.write().await;
        let stored = collections.get_mut(collection).ok_or_else(|| missing_collection(collection))?;
        for chunk in chunks {
            if chunk.embedding.len() != stored.dimensions {
                return Err(dimension_error(stored.dimensions, chunk.embedding.len()));
            }
            stored.chunks.insert(chunk.id.clone(), chunk.clone());
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
        score_threshold: f32,
    ) -> Result<Vec<SearchResult>> {
        let collections = self.collections.read().await;
        let stored = collections.get(collection).ok_or_else(|| missing_collection(collection))?;
        if embedding.len() != stored.dimensions {
            return Err(dimension_error(stored.dimensions, embedding.len()));
        }

        let mut scored: Vec<SearchResult> = stored
            .chunks
            .values()
            .map(|chunk| SearchResult {
                score: cosine_similarity(&chunk.embedding, embedding),
                chunk: chunk.clone(),
            })
            .filter(|result| result.score >= score_threshold)
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &str, embedding: Vec<f32>) -> Chunk {
        Chunk {
            id: id.to_string(),
            text: format!("text for {id}"),
            embedding,
            metadata: HashMap::new(),
            document_id: "doc".to_string(),
        }
    }

    #[tokio::test]
    async fn threshold_boundary_score_is_kept() {
        let store = InMemoryVectorStore::new();
        store.create_collection("c", 2).await.unwrap();
        // Identical direction: similarity is exactly 1.0.
        store.upsert("c", &[chunk("a", vec![1.0, 0.0])]).await.unwrap();

        let hits = store.search("c", &[1.0, 0.0], 5, 1.0).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].chunk.id, "a");
    }

    #[tokio::test]
    async fn below_threshold_scores_are_dropped() {
        let store = InMemoryVectorStore::new();
        store.create_collection("c", 2).await.unwrap();
        store
            .upsert("c", &[chunk("near", vec![1.0, 0.0]), chunk("far", vec![0.0, 1.0])])
            .await
            .unwrap();

        // Orthogonal vector scores 0.0 and falls below the threshold.
        let hits = store.search("c", &[1.0, 0.0], 5, 0.5).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].chunk.id, "near");
    }

    #[tokio::test]
    async fn dimension_mismatch_is_an_error() {
        let store = InMemoryVectorStore::new();
        store.create_collection("c", 3).await.unwrap();

        let err = store.upsert("c", &[chunk("a", vec![1.0, 0.0])]).await.unwrap_err();
        assert!(matches!(err, RagError::Store { .. }));

        let err = store.search("c", &[1.0, 0.0], 5, 0.0).await.unwrap_err();
        assert!(matches!(err, RagError::Store { .. }));
    }
}
