//! # docchat-rag
//!
//! Retrieval stack for the docchat document QA service.
//!
//! ## Overview
//!
//! This crate provides the leaf dependencies of the QA pipeline:
//!
//! - [`EmbeddingProvider`] — text → fixed-length vector, with an OpenAI
//!   implementation behind the `openai` feature
//! - [`VectorStore`] — thresholded similarity search over named collections,
//!   with an in-memory implementation and a Qdrant backend behind the
//!   `qdrant` feature
//! - [`RecursiveSplitter`] — hierarchical text splitting for ingestion
//! - [`Ingestor`] — directory walk → split → embed → upsert
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docchat_rag::{Ingestor, InMemoryVectorStore, RecursiveSplitter};
//! use docchat_rag::openai::OpenAiEmbedder;
//!
//! let embedder = Arc::new(OpenAiEmbedder::from_env()?);
//! let store = Arc::new(InMemoryVectorStore::new());
//! store.create_collection("acs-chat", embedder.dimensions()).await?;
//!
//! let ingestor = Ingestor::new(embedder, store, Arc::new(RecursiveSplitter::default()));
//! ingestor.ingest_dir("acs-chat", Path::new("./docs")).await?;
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod ingest;
pub mod inmemory;
#[cfg(feature = "openai")]
pub mod openai;
#[cfg(feature = "qdrant")]
pub mod qdrant;
pub mod vectorstore;

pub use chunking::{RecursiveSplitter, TextSplitter};
pub use config::RetrievalConfig;
pub use document::{Chunk, Document, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use ingest::Ingestor;
pub use inmemory::InMemoryVectorStore;
#[cfg(feature = "qdrant")]
pub use qdrant::QdrantVectorStore;
pub use vectorstore::VectorStore;
