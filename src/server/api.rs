use crate::models::api::{ ChatReply, ChatRequest };
use crate::proxy::{ ChatProxy, ProxyError };
use std::sync::Arc;
use axum::{
    routing::{ get, post },
    Json,
    Router,
    extract::State,
};
use serde_json::{ json, Value };
use tower_http::cors::{ Any, CorsLayer };
use log::info;

pub const CHAT_ROUTE: &str = "/api/gemini";

#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<ChatProxy>,
}

pub fn router(proxy: Arc<ChatProxy>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(CHAT_ROUTE, post(chat_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(AppState { proxy })
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ProxyError> {
    info!("Chat request received ({} chars)", req.message.chars().count());
    let outcome = state.proxy.handle(&req.message).await?;
    Ok(Json(ChatReply { reply: outcome.into_reply() }))
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Persona;
    use crate::models::api::{ FALLBACK_REPLY, MISSING_KEY_REPLY, SERVICE_ERROR_REPLY };
    use crate::proxy::tests::{ MockChatClient, candidate };
    use axum::body::{ Body, to_bytes };
    use axum::http::{ Request, StatusCode, header };
    use tower::ServiceExt;

    fn app(client: Arc<MockChatClient>, key: Option<&str>) -> Router {
        let proxy = ChatProxy::new(client, key.map(str::to_owned), Arc::new(Persona::default()));
        router(Arc::new(proxy))
    }

    async fn post_chat(app: Router, body: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(CHAT_ROUTE)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_owned()))
                    .unwrap()
            ).await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn relays_generated_reply() {
        let client = MockChatClient::replying(candidate("Hi!"));
        let (status, body) = post_chat(app(client.clone(), Some("key")), r#"{"message": "hello"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "reply": "Hi!" }));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn missing_candidates_is_a_successful_fallback() {
        let client = MockChatClient::replying(json!({ "promptFeedback": {} }));
        let (status, body) = post_chat(app(client, Some("key")), r#"{"message": "hello"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "reply": FALLBACK_REPLY }));
    }

    #[tokio::test]
    async fn missing_key_is_a_server_error_without_external_call() {
        let client = MockChatClient::replying(candidate("Hi!"));
        let (status, body) = post_chat(app(client.clone(), None), r#"{"message": "hello"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "reply": MISSING_KEY_REPLY }));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn upstream_failure_is_a_server_error() {
        let client = MockChatClient::failing(500);
        let (status, body) = post_chat(app(client, Some("key")), r#"{"message": "hello"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "reply": SERVICE_ERROR_REPLY }));
    }

    #[tokio::test]
    async fn body_without_message_is_rejected_before_proxying() {
        let client = MockChatClient::replying(candidate("Hi!"));
        let (status, _) = post_chat(app(client.clone(), Some("key")), r#"{"text": "hello"}"#).await;
        assert!(status.is_client_error());
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn health_reports_version() {
        let client = MockChatClient::replying(candidate("Hi!"));
        let resp = app(client, None)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()).await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
