//! The QA chain: compose → retrieve → assemble → generate, normalized into
//! one uniform answer stream.

use std::pin::Pin;
use std::sync::Arc;

use async_stream::stream;
use futures::{Stream, StreamExt, stream as futures_stream};
use tracing::{info, warn};

use docchat_model::{ChatModel, TokenStream};
use docchat_rag::{EmbeddingProvider, RagError, RetrievalConfig, VectorStore};

use crate::history::ConversationTurn;
use crate::prompt::assemble_prompt;
use crate::query::compose_query;
use crate::retrieval::{RetrievalOutcome, Retriever};

/// The fixed payload streamed when retrieval finds nothing usable.
///
/// Consumers pattern-match on this exact literal to distinguish "no relevant
/// content" from a real answer; it is a constant, never derived from input.
pub const NO_RELEVANT_CONTENT: &str = "内容不相关";

/// Prefix of the single trailing fragment emitted when generation fails
/// after streaming has begun. Also a stable, documented literal.
pub const ERROR_PREFIX: &str = "error: ";

/// The QA call site favors recall over precision, so it loosens the
/// default retrieval threshold.
const QA_SIMILARITY_THRESHOLD: f32 = 0.3;

/// The uniform answer stream handed to the transport layer.
///
/// Always a valid sequence of text fragments, one of three shapes: a real
/// streamed answer, the single [`NO_RELEVANT_CONTENT`] fragment, or a
/// partial answer terminated by one [`ERROR_PREFIX`]-marked fragment.
pub type AnswerStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// What the generation step decided to produce.
///
/// The two arms are driven differently inside [`normalize`] but are
/// indistinguishable from outside: both become an [`AnswerStream`].
enum Generation {
    /// An immediately-available fixed payload; the backend is not touched.
    Fallback(&'static str),
    /// A live backend stream, forwarded fragment by fragment.
    Stream(TokenStream),
}

/// Turn either generation variant into the uniform answer stream.
///
/// Backend fragments are forwarded unchanged in arrival order, one
/// suspension per fragment, no buffering. A mid-stream error becomes one
/// final marked fragment; fragments already delivered stand. Dropping the
/// result drops the backend stream with it.
fn normalize(generation: Generation) -> AnswerStream {
    match generation {
        Generation::Fallback(text) => {
            Box::pin(futures_stream::once(async move { text.to_string() }))
        }
        Generation::Stream(mut tokens) => Box::pin(stream! {
            while let Some(next) = tokens.next().await {
                match next {
                    Ok(fragment) => yield fragment,
                    Err(e) => {
                        warn!(error = %e, "generation failed mid-stream");
                        yield format!("{ERROR_PREFIX}{e}");
                        break;
                    }
                }
            }
        }),
    }
}

/// The question-answering pipeline.
///
/// Composes the retrieval gate, prompt assembly, and the chat model into the
/// single entry point [`answer`](QaChain::answer). Construct one via
/// [`QaChain::builder()`] with injected clients; the chain itself holds no
/// per-request state.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use docchat_chain::QaChain;
///
/// let chain = QaChain::builder()
///     .embedder(embedder)
///     .vector_store(store)
///     .collection("acs-chat")
///     .chat_model(model)
///     .build()?;
///
/// let mut answer = chain.answer(&history, "How big is it?").await;
/// ```
pub struct QaChain {
    retriever: Retriever,
    model: Arc<dyn ChatModel>,
    config: RetrievalConfig,
}

impl QaChain {
    /// Create a new [`QaChainBuilder`].
    pub fn builder() -> QaChainBuilder {
        QaChainBuilder::default()
    }

    /// Answer `new_message` in the context of `history`.
    ///
    /// Steps, strictly in order: compose the search query, run the retrieval
    /// gate, assemble the grounded prompt (skipped without evidence), start
    /// generation. Every failure along the way folds into a valid stream —
    /// this method cannot fail, and the caller never needs to special-case
    /// which path produced the stream.
    pub async fn answer(&self, history: &[ConversationTurn], new_message: &str) -> AnswerStream {
        let query = compose_query(history, new_message);
        let outcome = self
            .retriever
            .retrieve(&query, self.config.top_k, self.config.similarity_threshold)
            .await;

        let generation = match outcome {
            RetrievalOutcome::Evidence(passages) => {
                info!(passage_count = passages.len(), "answering with retrieved evidence");
                let prompt = assemble_prompt(&passages, history, new_message);
                match self.model.stream_chat(&prompt).await {
                    Ok(tokens) => Generation::Stream(tokens),
                    Err(e) => {
                        warn!(model = self.model.name(), error = %e,
                            "generation call failed before streaming");
                        Generation::Fallback(NO_RELEVANT_CONTENT)
                    }
                }
            }
            RetrievalOutcome::NoEvidence => Generation::Fallback(NO_RELEVANT_CONTENT),
        };

        normalize(generation)
    }
}

/// Builder for a [`QaChain`].
///
/// All fields except `config` are required.
#[derive(Default)]
pub struct QaChainBuilder {
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    collection: Option<String>,
    chat_model: Option<Arc<dyn ChatModel>>,
    config: Option<RetrievalConfig>,
}

impl QaChainBuilder {
    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector store backend.
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.vector_store = Some(store);
        self
    }

    /// Set the collection to search.
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Set the chat model.
    pub fn chat_model(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.chat_model = Some(model);
        self
    }

    /// Override the retrieval parameters.
    ///
    /// Defaults to `top_k = 5` with the recall-favoring threshold of 0.3.
    pub fn config(mut self, config: RetrievalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the [`QaChain`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if a required field is missing.
    pub fn build(self) -> docchat_rag::Result<QaChain> {
        let embedder = self
            .embedder
            .ok_or_else(|| RagError::Config("embedder is required".to_string()))?;
        let vector_store = self
            .vector_store
            .ok_or_else(|| RagError::Config("vector_store is required".to_string()))?;
        let collection = self
            .collection
            .ok_or_else(|| RagError::Config("collection is required".to_string()))?;
        let chat_model = self
            .chat_model
            .ok_or_else(|| RagError::Config("chat_model is required".to_string()))?;
        let config = match self.config {
            Some(config) => config,
            None => RetrievalConfig::builder()
                .similarity_threshold(QA_SIMILARITY_THRESHOLD)
                .build()?,
        };

        Ok(QaChain {
            retriever: Retriever::new(embedder, vector_store, collection),
            model: chat_model,
            config,
        })
    }
}
