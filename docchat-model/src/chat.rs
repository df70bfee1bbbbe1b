//! Chat model trait and the streamed token type.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::ModelError;

/// A lazy sequence of generated text fragments.
///
/// Fragments arrive in production order; concatenating them in order
/// reconstructs the full answer. A mid-stream failure is delivered as an
/// `Err` item, after which the stream ends. Dropping the stream releases the
/// underlying backend connection.
pub type TokenStream = Pin<Box<dyn Stream<Item = Result<String, ModelError>> + Send>>;

/// A text-generation backend invoked in streaming mode.
///
/// `stream_chat` returns `Err` only for failures before the first fragment
/// (request construction, rejected call, timeout after bounded retries).
/// Failures after streaming has begun surface as an `Err` item inside the
/// returned [`TokenStream`].
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// The model identifier, for logging.
    fn name(&self) -> &str;

    /// Stream a completion for the given prompt.
    async fn stream_chat(&self, prompt: &str) -> Result<TokenStream, ModelError>;
}
