//! Environment-driven service configuration.

use anyhow::Context;

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Service configuration read from the environment (`.env` supported).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// OpenAI API key, used for both embeddings and generation.
    pub openai_api_key: String,
    /// Qdrant gRPC URL.
    pub qdrant_url: String,
    /// Name of the indexed collection.
    pub collection: String,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Chat model name.
    pub chat_model: String,
}

impl ServerConfig {
    /// Read the configuration from the environment.
    ///
    /// `OPENAI_API_KEY` is required; everything else has a default matching
    /// the standard deployment.
    pub fn from_env() -> anyhow::Result<Self> {
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY environment variable not set")?;

        Ok(Self {
            openai_api_key,
            qdrant_url: env_or("QDRANT_URL", "http://localhost:6334"),
            collection: env_or("DOCCHAT_COLLECTION", "acs-chat"),
            bind_addr: env_or("DOCCHAT_BIND", "0.0.0.0:8000"),
            chat_model: env_or("DOCCHAT_CHAT_MODEL", "gpt-4o-mini"),
        })
    }
}
