//! # docchat-model
//!
//! Streaming chat model integrations for the docchat document QA service.
//!
//! ## Overview
//!
//! - [`ChatModel`] — the backend trait: prompt in, [`TokenStream`] out
//! - [`OpenAiChatModel`] — OpenAI chat completions with streaming, a bounded
//!   call timeout, and pre-stream retries (`openai` feature)
//! - [`MockChatModel`] — scripted model for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docchat_model::openai::{OpenAiChatConfig, OpenAiChatModel};
//! use futures::StreamExt;
//!
//! let model = OpenAiChatModel::from_env()?;
//! let mut tokens = model.stream_chat("Answer the question: ...").await?;
//! while let Some(fragment) = tokens.next().await {
//!     print!("{}", fragment?);
//! }
//! ```

pub mod chat;
pub mod error;
pub mod mock;
#[cfg(feature = "openai")]
pub mod openai;

pub use chat::{ChatModel, TokenStream};
pub use error::ModelError;
pub use mock::MockChatModel;
#[cfg(feature = "openai")]
pub use openai::{OpenAiChatConfig, OpenAiChatModel};
