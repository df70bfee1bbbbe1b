//! Data types for ingested documents, chunks, and search hits.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A source document read from disk, ready for splitting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Identifier for the document, unique within one ingest run.
    pub id: String,
    /// The full text content of the document.
    pub text: String,
    /// Key-value metadata attached to every chunk produced from this document.
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Create a document with no metadata.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into(), metadata: HashMap::new() }
    }
}

/// A segment of a [`Document`] with its vector embedding.
///
/// Chunk ids are UUIDs so they are valid point ids in every supported store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk.
    pub id: String,
    /// The text content of the chunk.
    pub text: String,
    /// The vector embedding for this chunk's text. Empty until embedded.
    pub embedding: Vec<f32>,
    /// Metadata inherited from the parent document plus a `chunk_index` field.
    pub metadata: HashMap<String, String>,
    /// The id of the parent [`Document`].
    pub document_id: String,
}

/// A retrieved [`Chunk`] paired with its similarity score against the query.
///
/// Scores are cosine similarities in `[0, 1]`; higher is more relevant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The similarity score against the query vector.
    pub score: f32,
}
