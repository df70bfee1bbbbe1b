//! Text splitting for ingestion.
//!
//! [`RecursiveSplitter`] breaks document text along progressively finer
//! boundaries (paragraphs, then sentences, then words) until every chunk
//! fits the size limit, carrying a character overlap between neighbours.

use uuid::Uuid;

use crate::document::{Chunk, Document};

/// Default maximum chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Default overlap between consecutive chunks in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;

/// A strategy for splitting documents into embeddable chunks.
///
/// Returned chunks have UUID ids, the parent document's metadata plus a
/// `chunk_index` field, and an empty embedding (filled in later by the
/// ingest path).
pub trait TextSplitter: Send + Sync {
    /// Split a document into chunks. Empty text yields no chunks.
    fn split(&self, document: &Document) -> Vec<Chunk>;
}

/// Splits text hierarchically: paragraphs → sentences → words.
///
/// Splits by paragraph separators (`\n\n`) first; any segment still larger
/// than `chunk_size` is split at sentence boundaries (`. `, `! `, `? `),
/// then at word boundaries as a last resort.
#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for RecursiveSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

impl RecursiveSplitter {
    /// Create a splitter with the given chunk size and overlap (characters).
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }
}

/// Split at a separator while keeping the separator attached to the
/// preceding segment.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut segments = Vec::new();
    let mut start = 0;

    while let Some(pos) = text[start..].find(separator) {
        let end = start + pos + separator.len();
        segments.push(&text[start..end]);
        start = end;
    }
    if start < text.len() {
        segments.push(&text[start..]);
    }
    segments
}

/// Size-based splitting with overlap, the bottom of the hierarchy.
/// Cut points snap to char boundaries; indexed text may be non-ASCII.
fn split_by_size(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let mut end = (start + chunk_size).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        if end <= start {
            // chunk_size is smaller than the next char; take it whole
            let width = text[start..].chars().next().map_or(1, char::len_utf8);
            end = start + width;
        }
        pieces.push(text[start..end].to_string());
        if end == text.len() {
            break;
        }
        let step = chunk_size.saturating_sub(chunk_overlap);
        if step == 0 {
            break;
        }
        let mut next = start + step;
        while next < text.len() && !text.is_char_boundary(next) {
            next += 1;
        }
        start = next;
    }
    pieces
}

/// Split at the first separator level, merging segments up to `chunk_size`;
/// oversized segments recurse into the next level.
fn split_recursive(
    text: &str,
    chunk_size: usize,
    chunk_overlap: usize,
    separators: &[&str],
) -> Vec<String> {
    if text.len() <= chunk_size || separators.is_empty() {
        return split_by_size(text, chunk_size, chunk_overlap);
    }

    let separator = separators[0];
    let finer = &separators[1..];
    let segments: Vec<&str> = if separator == " " {
        text.split(' ').collect()
    } else {
        split_keeping_separator(text, separator)
    };

    let mut pieces = Vec::new();
    let mut current = String::new();
    for segment in segments {
        if current.is_empty() {
            current = segment.to_string();
        } else if current.len() + segment.len() <= chunk_size {
            current.push_str(segment);
        } else {
            if current.len() > chunk_size {
                pieces.extend(split_recursive(&current, chunk_size, chunk_overlap, finer));
            } else {
                pieces.push(current);
            }
            current = segment.to_string();
        }
    }
    if !current.is_empty() {
        if current.len() > chunk_size {
            pieces.extend(split_recursive(&current, chunk_size, chunk_overlap, finer));
        } else {
            pieces.push(current);
        }
    }
    pieces
}

impl TextSplitter for RecursiveSplitter {
    fn split(&self, document: &Document) -> Vec<Chunk> {
        if document.text.is_empty() {
            return Vec::new();
        }

        let separators = ["\n\n", ". ", "! ", "? ", " "];
        split_recursive(&document.text, self.chunk_size, self.chunk_overlap, &separators)
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let mut metadata = document.metadata.clone();
                metadata.insert("chunk_index".to_string(), i.to_string());
                Chunk {
                    id: Uuid::new_v4().to_string(),
                    text,
                    embedding: Vec::new(),
                    metadata,
                    document_id: document.id.clone(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_no_chunks() {
        let splitter = RecursiveSplitter::default();
        assert!(splitter.split(&Document::new("d", "")).is_empty());
    }

    #[test]
    fn short_document_is_a_single_chunk() {
        let splitter = RecursiveSplitter::new(100, 20);
        let chunks = splitter.split(&Document::new("d", "one short paragraph"));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "one short paragraph");
        assert_eq!(chunks[0].document_id, "d");
        assert_eq!(chunks[0].metadata["chunk_index"], "0");
    }

    #[test]
    fn splits_on_paragraphs_before_sentences() {
        let splitter = RecursiveSplitter::new(30, 0);
        let text = "first paragraph here.\n\nsecond paragraph here.";
        let chunks = splitter.split(&Document::new("d", text));
        assert!(chunks.len() >= 2);
        assert!(chunks[0].text.starts_with("first"));
    }

    #[test]
    fn every_chunk_respects_the_size_limit_for_word_separable_text() {
        let splitter = RecursiveSplitter::new(40, 10);
        let text = "lorem ipsum dolor sit amet ".repeat(20);
        let chunks = splitter.split(&Document::new("d", text));
        assert!(chunks.iter().all(|c| c.text.len() <= 40));
    }

    #[test]
    fn chunk_indices_are_sequential() {
        let splitter = RecursiveSplitter::new(20, 0);
        let chunks = splitter.split(&Document::new("d", "a b. ".repeat(30)));
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.metadata["chunk_index"], i.to_string());
        }
    }
}
