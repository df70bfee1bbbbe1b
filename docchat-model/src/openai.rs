//! OpenAI streaming chat client.
//!
//! Only available with the `openai` feature.

use std::time::Duration;

use async_openai::Client;
use async_openai::config::OpenAIConfig as AsyncOpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_stream::stream;
use async_trait::async_trait;
use futures::StreamExt;
use tracing::warn;

use crate::chat::{ChatModel, TokenStream};
use crate::error::ModelError;

/// Default chat model.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for [`OpenAiChatModel`].
#[derive(Debug, Clone)]
pub struct OpenAiChatConfig {
    /// OpenAI API key.
    pub api_key: String,
    /// Model name, e.g. `gpt-4o-mini`.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate per answer.
    pub max_tokens: u32,
    /// Deadline for the initial streaming call.
    pub timeout: Duration,
    /// Retries of the initial call. Never applied once streaming has begun.
    pub max_retries: u32,
}

impl OpenAiChatConfig {
    /// Create a config with the default generation settings: deterministic
    /// sampling, 1024-token answers, a 30 s call deadline, and 2 retries.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            temperature: 0.0,
            max_tokens: 1024,
            timeout: Duration::from_secs(30),
            max_retries: 2,
        }
    }

    /// Override the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// A [`ChatModel`] backed by the OpenAI chat completions API.
///
/// # Example
///
/// ```rust,ignore
/// use docchat_model::openai::{OpenAiChatConfig, OpenAiChatModel};
///
/// let model = OpenAiChatModel::new(OpenAiChatConfig::new(api_key))?;
/// let mut tokens = model.stream_chat("Answer: ...").await?;
/// ```
pub struct OpenAiChatModel {
    client: Client<AsyncOpenAIConfig>,
    config: OpenAiChatConfig,
}

impl OpenAiChatModel {
    /// Create a new client from the given configuration.
    pub fn new(config: OpenAiChatConfig) -> Result<Self, ModelError> {
        if config.api_key.is_empty() {
            return Err(ModelError::Config("API key must not be empty".into()));
        }
        let openai_config = AsyncOpenAIConfig::new().with_api_key(&config.api_key);
        Ok(Self { client: Client::with_config(openai_config), config })
    }

    /// Create a new client from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, ModelError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            ModelError::Config("OPENAI_API_KEY environment variable not set".into())
        })?;
        Self::new(OpenAiChatConfig::new(api_key))
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn stream_chat(&self, prompt: &str) -> Result<TokenStream, ModelError> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| ModelError::Request(format!("failed to build message: {e}")))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages([message.into()])
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .build()
            .map_err(|e| ModelError::Request(format!("failed to build request: {e}")))?;

        // Bounded retries apply only here, before any fragment has been
        // emitted. A retry after partial output would duplicate it.
        let mut attempt = 0;
        let mut inner = loop {
            let chat = self.client.chat();
            let call = chat.create_stream(request.clone());
            match tokio::time::timeout(self.config.timeout, call).await {
                Ok(Ok(stream)) => break stream,
                Ok(Err(e)) if attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(attempt, error = %e, "chat completion call failed, retrying");
                }
                Ok(Err(e)) => {
                    return Err(ModelError::Api {
                        provider: "OpenAI".into(),
                        message: e.to_string(),
                    });
                }
                Err(_) if attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(attempt, "chat completion call timed out, retrying");
                }
                Err(_) => return Err(ModelError::Timeout(self.config.timeout.as_secs())),
            }
        };

        let tokens = stream! {
            while let Some(next) = inner.next().await {
                match next {
                    Ok(chunk) => {
                        let content =
                            chunk.choices.first().and_then(|choice| choice.delta.content.clone());
                        if let Some(fragment) = content {
                            if !fragment.is_empty() {
                                yield Ok(fragment);
                            }
                        }
                    }
                    Err(e) => {
                        yield Err(ModelError::Stream(e.to_string()));
                        break;
                    }
                }
            }
        };

        Ok(Box::pin(tokens))
    }
}
