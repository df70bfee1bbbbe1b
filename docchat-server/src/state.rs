//! Shared application state.

use std::sync::Arc;

use docchat_chain::QaChain;

/// State shared across all request handlers.
///
/// Holds the long-lived pipeline (and through it the embedder, store, and
/// model clients); handlers never mutate it.
#[derive(Clone)]
pub struct AppState {
    /// The QA pipeline.
    pub chain: Arc<QaChain>,
}

impl AppState {
    /// Create the state around a built pipeline.
    pub fn new(chain: Arc<QaChain>) -> Self {
        Self { chain }
    }
}
