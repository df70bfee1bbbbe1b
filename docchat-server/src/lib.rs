//! # docchat-server
//!
//! HTTP transport for the docchat document QA service.
//!
//! Exposes `POST /api/v1/qa`: the caller sends a conversation history plus a
//! new message and receives the answer as a chunked `text/event-stream` of
//! text fragments. Framing, CORS, and request validation live here; the
//! pipeline itself is `docchat-chain`.
//!
//! The `docchat` binary wraps this with a `serve` command and an
//! `ingest` command for populating the index from a directory of documents.

pub mod config;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use routes::{QaRequest, api_routes};
pub use state::AppState;
