//! Directory ingestion: walk → split → embed → upsert.
//!
//! [`Ingestor`] populates a collection from a directory tree of text files.
//! Hidden entries and scratch files are skipped; a file that fails to read
//! or embed is logged and skipped rather than aborting the whole run.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::chunking::TextSplitter;
use crate::document::Document;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// File extensions that are never worth indexing.
const SKIP_EXTENSIONS: &[&str] = &["log", "tmp", "temp", "swp", "swo"];

/// Ingests documents from disk into a vector store collection.
///
/// # Example
///
/// ```rust,ignore
/// use docchat_rag::{Ingestor, InMemoryVectorStore, RecursiveSplitter};
///
/// let ingestor = Ingestor::new(embedder, store, Arc::new(RecursiveSplitter::default()));
/// let chunk_count = ingestor.ingest_dir("acs-chat", Path::new("./docs")).await?;
/// ```
pub struct Ingestor {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    splitter: Arc<dyn TextSplitter>,
}

impl Ingestor {
    /// Create an ingestor over the given clients and splitting strategy.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        splitter: Arc<dyn TextSplitter>,
    ) -> Self {
        Self { embedder, store, splitter }
    }

    /// Walk `root` recursively and ingest every eligible text file.
    ///
    /// Returns the total number of chunks stored.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Ingest`] if `root` does not exist. Per-file
    /// failures are logged and skipped.
    pub async fn ingest_dir(&self, collection: &str, root: &Path) -> Result<usize> {
        if !root.is_dir() {
            return Err(RagError::Ingest(format!("directory not found: {}", root.display())));
        }

        let mut total = 0;
        let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
            // Keep the root itself; skip hidden files and directories below it.
            entry.depth() == 0
                || !entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
        });

        for entry in walker.filter_map(std::result::Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let skip = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| SKIP_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
            if skip {
                continue;
            }

            match self.ingest_file(collection, root, path).await {
                Ok(count) => {
                    info!(file = %path.display(), chunk_count = count, "ingested file");
                    total += count;
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping file");
                }
            }
        }

        info!(collection, chunk_count = total, "ingest run complete");
        Ok(total)
    }

    /// Ingest a single file: read → split → embed → upsert.
    ///
    /// Returns the number of chunks stored (0 for an empty file).
    pub async fn ingest_file(&self, collection: &str, root: &Path, path: &Path) -> Result<usize> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RagError::Ingest(format!("failed to read {}: {e}", path.display())))?;

        let rel_path = path.strip_prefix(root).unwrap_or(path);
        let mut document = Document::new(rel_path.to_string_lossy(), text);
        document.metadata.insert("root_dir".into(), root.to_string_lossy().into_owned());
        document.metadata.insert(
            "sub_dir".into(),
            rel_path.parent().map(|p| p.to_string_lossy().into_owned()).unwrap_or_default(),
        );
        document.metadata.insert(
            "file".into(),
            path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
        );
        document.metadata.insert("filepath".into(), path.to_string_lossy().into_owned());
        document.metadata.insert("rel_filepath".into(), rel_path.to_string_lossy().into_owned());

        let mut chunks = self.splitter.split(&document);
        if chunks.is_empty() {
            return Ok(0);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        self.store.upsert(collection, &chunks).await?;
        Ok(chunks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::fs;

    use async_trait::async_trait;

    use crate::chunking::RecursiveSplitter;
    use crate::inmemory::InMemoryVectorStore;

    /// Maps any text to a constant small vector.
    struct FlatEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FlatEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        fn dimensions(&self) -> usize {
            2
        }
    }

    fn ingestor(store: Arc<InMemoryVectorStore>) -> Ingestor {
        Ingestor::new(
            Arc::new(FlatEmbedder),
            store,
            Arc::new(RecursiveSplitter::new(100, 0)),
        )
    }

    #[tokio::test]
    async fn ingests_text_files_and_skips_hidden_and_scratch_files() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("a.txt"), "alpha content").unwrap();
        fs::write(root.join("sub/b.txt"), "beta content").unwrap();
        fs::write(root.join("sub/c.log"), "scratch").unwrap();
        fs::write(root.join(".hidden"), "secret").unwrap();
        fs::write(root.join(".git/config"), "noise").unwrap();

        let store = Arc::new(InMemoryVectorStore::new());
        store.create_collection("docs", 2).await.unwrap();

        let total = ingestor(Arc::clone(&store)).ingest_dir("docs", root).await.unwrap();
        assert_eq!(total, 2);

        let hits = store.search("docs", &[1.0, 0.0], 10, 0.0).await.unwrap();
        let files: Vec<&str> =
            hits.iter().map(|h| h.chunk.metadata["file"].as_str()).collect();
        assert!(files.contains(&"a.txt"));
        assert!(files.contains(&"b.txt"));
    }

    #[tokio::test]
    async fn chunk_metadata_records_file_location() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("nested")).unwrap();
        fs::write(root.join("nested/doc.txt"), "nested file body").unwrap();

        let store = Arc::new(InMemoryVectorStore::new());
        store.create_collection("docs", 2).await.unwrap();
        ingestor(Arc::clone(&store)).ingest_dir("docs", root).await.unwrap();

        let hits = store.search("docs", &[1.0, 0.0], 1, 0.0).await.unwrap();
        let metadata: &HashMap<String, String> = &hits[0].chunk.metadata;
        assert_eq!(metadata["sub_dir"], "nested");
        assert_eq!(metadata["rel_filepath"], "nested/doc.txt");
        assert_eq!(metadata["chunk_index"], "0");
    }

    #[tokio::test]
    async fn missing_root_is_an_error() {
        let store = Arc::new(InMemoryVectorStore::new());
        let result = ingestor(store).ingest_dir("docs", Path::new("/no/such/dir")).await;
        assert!(matches!(result, Err(RagError::Ingest(_))));
    }
}
