//! HTTP routes: request schemas and the streaming QA handler.

use std::convert::Infallible;

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use futures::StreamExt;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use docchat_chain::ConversationTurn;

use crate::state::AppState;

/// Body of `POST /api/v1/qa`.
///
/// Deserialization enforces the role contract: any role outside
/// `system`/`user`/`assistant` fails extraction with a 422 before the
/// pipeline is invoked.
#[derive(Debug, Deserialize)]
pub struct QaRequest {
    /// Prior conversation turns, oldest first.
    pub history: Vec<ConversationTurn>,
    /// The new user message to answer.
    pub message: String,
}

/// Build the API router with permissive CORS.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/qa", post(qa))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

/// Answer a question, streaming fragments as they are produced.
///
/// The pipeline always yields a valid stream (a real answer, the fixed
/// "not relevant" sentinel, or a partial answer with a trailing error
/// marker), so this handler has no failure branch of its own. A client
/// disconnect drops the body stream, which releases the backend stream.
async fn qa(State(state): State<AppState>, Json(request): Json<QaRequest>) -> Response {
    info!(history_len = request.history.len(), "qa request");

    let answer = state.chain.answer(&request.history, &request.message).await;
    let body = Body::from_stream(answer.map(Ok::<_, Infallible>));

    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::to_bytes;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use docchat_chain::{NO_RELEVANT_CONTENT, QaChain};
    use docchat_model::MockChatModel;
    use docchat_rag::{EmbeddingProvider, InMemoryVectorStore, Result as RagResult, VectorStore};

    use super::*;

    struct UnitEmbedder;

    #[async_trait]
    impl EmbeddingProvider for UnitEmbedder {
        async fn embed(&self, _text: &str) -> RagResult<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        fn dimensions(&self) -> usize {
            2
        }
    }

    async fn router_with_empty_index() -> Router {
        let store = Arc::new(InMemoryVectorStore::new());
        store.create_collection("test", 2).await.unwrap();
        let chain = QaChain::builder()
            .embedder(Arc::new(UnitEmbedder))
            .vector_store(store)
            .collection("test")
            .chat_model(Arc::new(MockChatModel::new(["unused"])))
            .build()
            .unwrap();
        api_routes(AppState::new(Arc::new(chain)))
    }

    fn qa_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/qa")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn qa_streams_the_sentinel_for_an_empty_index() {
        let app = router_with_empty_index().await;
        let response = app
            .oneshot(qa_request(r#"{"history": [], "message": "anything?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/event-stream"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, NO_RELEVANT_CONTENT.as_bytes());
    }

    #[tokio::test]
    async fn invalid_role_is_rejected_before_the_pipeline_runs() {
        let app = router_with_empty_index().await;
        let response = app
            .oneshot(qa_request(
                r#"{"history": [{"role": "tool", "content": "x"}], "message": "q"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
