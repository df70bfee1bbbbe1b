//! Error types for the `docchat-model` crate.

use thiserror::Error;

/// Errors that can occur when calling a chat model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The request could not be constructed.
    #[error("Chat request error: {0}")]
    Request(String),

    /// The backend rejected the call before any fragment was produced.
    #[error("Chat API error ({provider}): {message}")]
    Api {
        /// The model provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The initial streaming call did not complete within the deadline.
    #[error("Chat call timed out after {0} s")]
    Timeout(u64),

    /// The backend failed after the stream had started.
    #[error("Stream error: {0}")]
    Stream(String),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}
