//! Launcher for the docchat service: `docchat serve` / `docchat ingest`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use docchat_chain::QaChain;
use docchat_model::openai::{OpenAiChatConfig, OpenAiChatModel};
use docchat_rag::openai::OpenAiEmbedder;
use docchat_rag::qdrant::QdrantVectorStore;
use docchat_rag::{EmbeddingProvider, Ingestor, RecursiveSplitter, VectorStore};
use docchat_server::{AppState, ServerConfig, api_routes};

#[derive(Parser)]
#[command(name = "docchat", about = "Document QA service over an indexed collection")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server.
    Serve,
    /// Index a directory of text documents into the collection.
    Ingest {
        /// Directory to walk for documents.
        dir: PathBuf,
        /// Drop and recreate the collection first.
        #[arg(long)]
        reset: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_env()?;

    let embedder: Arc<dyn EmbeddingProvider> =
        Arc::new(OpenAiEmbedder::new(&config.openai_api_key)?);
    let store: Arc<dyn VectorStore> = Arc::new(QdrantVectorStore::new(&config.qdrant_url)?);

    match cli.command {
        Command::Serve => {
            store.create_collection(&config.collection, embedder.dimensions()).await?;

            let model = OpenAiChatModel::new(
                OpenAiChatConfig::new(&config.openai_api_key).with_model(&config.chat_model),
            )?;
            let chain = QaChain::builder()
                .embedder(embedder)
                .vector_store(store)
                .collection(&config.collection)
                .chat_model(Arc::new(model))
                .build()?;

            let app = api_routes(AppState::new(Arc::new(chain)));
            let listener = tokio::net::TcpListener::bind(&config.bind_addr)
                .await
                .with_context(|| format!("failed to bind {}", config.bind_addr))?;

            info!(addr = %config.bind_addr, collection = %config.collection, "serving");
            axum::serve(listener, app).await?;
        }
        Command::Ingest { dir, reset } => {
            if reset {
                info!(collection = %config.collection, "resetting collection");
                store.delete_collection(&config.collection).await?;
            }
            store.create_collection(&config.collection, embedder.dimensions()).await?;

            let ingestor =
                Ingestor::new(embedder, store, Arc::new(RecursiveSplitter::default()));
            let chunk_count = ingestor.ingest_dir(&config.collection, &dir).await?;
            info!(chunk_count, dir = %dir.display(), "ingest finished");
        }
    }

    Ok(())
}
