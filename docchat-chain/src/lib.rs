//! # docchat-chain
//!
//! The retrieval-augmented QA pipeline of the docchat document QA service.
//!
//! ## Overview
//!
//! One entry point: [`QaChain::answer`] takes a conversation history and a
//! new message and returns a lazy stream of answer fragments. Internally:
//!
//! 1. [`compose_query`] folds the last few turns into the search query
//! 2. [`Retriever`] embeds it and runs a thresholded similarity search,
//!    degrading every failure to "no evidence"
//! 3. [`assemble_prompt`] grounds the generation prompt in the retrieved
//!    passages (skipped when there is no evidence)
//! 4. the chat model streams the answer; without evidence the stream is the
//!    single fixed [`NO_RELEVANT_CONTENT`] fragment
//!
//! `answer` never fails: embedding, search, and pre-stream generation errors
//! all fold into the fallback stream, and a mid-stream generation error
//! terminates the stream with one [`ERROR_PREFIX`]-marked fragment.

pub mod chain;
pub mod history;
pub mod prompt;
pub mod query;
pub mod retrieval;

pub use chain::{AnswerStream, ERROR_PREFIX, NO_RELEVANT_CONTENT, QaChain, QaChainBuilder};
pub use history::{ConversationTurn, Role};
pub use prompt::assemble_prompt;
pub use query::compose_query;
pub use retrieval::{RetrievalOutcome, Retriever};
