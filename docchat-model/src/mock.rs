//! Scripted chat model for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::stream;

use crate::chat::{ChatModel, TokenStream};
use crate::error::ModelError;

/// A [`ChatModel`] that replays scripted fragments.
///
/// Supports the two failure shapes of a real backend: rejecting the call
/// before any fragment ([`fail_call`](MockChatModel::fail_call)) and dying
/// mid-stream after a number of fragments
/// ([`fail_after`](MockChatModel::fail_after)). Counts calls so tests can
/// assert the backend was (or was not) invoked.
#[derive(Default)]
pub struct MockChatModel {
    fragments: Vec<String>,
    fail_after: Option<usize>,
    fail_call: bool,
    calls: AtomicUsize,
}

impl MockChatModel {
    /// A model that streams the given fragments and completes.
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { fragments: fragments.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    /// Fail mid-stream after emitting `count` fragments.
    pub fn fail_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    /// Reject every call before emitting anything.
    pub fn fail_call(mut self) -> Self {
        self.fail_call = true;
        self
    }

    /// Number of times `stream_chat` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn stream_chat(&self, _prompt: &str) -> Result<TokenStream, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_call {
            return Err(ModelError::Api {
                provider: "mock".into(),
                message: "scripted call failure".into(),
            });
        }

        let emit = self.fail_after.unwrap_or(self.fragments.len());
        let mut items: Vec<Result<String, ModelError>> =
            self.fragments.iter().take(emit).cloned().map(Ok).collect();
        if self.fail_after.is_some() {
            items.push(Err(ModelError::Stream("scripted stream failure".into())));
        }

        Ok(Box::pin(stream::iter(items)))
    }
}
