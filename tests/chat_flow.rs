use async_trait::async_trait;
use portfolio_chat::config::Persona;
use portfolio_chat::llm::chat::{ ChatClient, LlmError };
use portfolio_chat::models::api::MISSING_KEY_REPLY;
use portfolio_chat::models::chat::Message;
use portfolio_chat::models::gemini::GenerateContentRequest;
use portfolio_chat::proxy::ChatProxy;
use portfolio_chat::server::api::{ router, CHAT_ROUTE };
use portfolio_chat::widget::{ ChatWidget, HttpProxyTransport, Submission };
use serde_json::{ json, Value };
use std::sync::Arc;
use std::sync::atomic::{ AtomicUsize, Ordering };

struct CountingClient {
    text: String,
    calls: AtomicUsize,
}

#[async_trait]
impl ChatClient for CountingClient {
    async fn generate_content(
        &self,
        _api_key: &str,
        _request: &GenerateContentRequest
    ) -> Result<Value, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({ "candidates": [{ "content": { "parts": [{ "text": self.text }] } }] }))
    }

    fn get_model(&self) -> String {
        "counting".to_string()
    }

    fn get_base_url(&self) -> String {
        "test://".to_string()
    }
}

async fn spawn_proxy(
    client: Arc<CountingClient>,
    api_key: Option<&str>,
    persona: Arc<Persona>
) -> String {
    let proxy = ChatProxy::new(client, api_key.map(str::to_owned), persona);
    let app = router(Arc::new(proxy));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}{}", addr, CHAT_ROUTE)
}

#[tokio::test]
async fn owner_question_then_general_question() {
    let persona = Arc::new(Persona::default());
    let client = Arc::new(CountingClient {
        text: "Cloudy with a chance of rain.".to_string(),
        calls: AtomicUsize::new(0),
    });
    let url = spawn_proxy(client.clone(), Some("test-key"), persona.clone()).await;
    let widget = ChatWidget::new(persona.clone(), HttpProxyTransport::new(url));
    widget.open().await;

    assert_eq!(widget.submit("Tell me about Sneha").await, Submission::AnsweredLocally);
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);

    let submission = widget.submit("What's the weather like?").await;
    assert!(matches!(submission, Submission::Pending(_)));
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);

    let state = widget.state();
    let state = state.lock().await;
    assert!(!state.is_loading());
    assert_eq!(
        state.messages(),
        [
            Message::assistant(persona.widget_greeting.clone()),
            Message::user("Tell me about Sneha"),
            Message::assistant(persona.description.clone()),
            Message::user("What's the weather like?"),
            Message::assistant("Cloudy with a chance of rain."),
        ]
    );
    assert_eq!(state.scroll_anchor(), Some(4));
}

#[tokio::test]
async fn missing_key_reply_reaches_the_transcript() {
    let persona = Arc::new(Persona::default());
    let client = Arc::new(CountingClient { text: "unused".to_string(), calls: AtomicUsize::new(0) });
    let url = spawn_proxy(client.clone(), None, persona.clone()).await;
    let widget = ChatWidget::new(persona, HttpProxyTransport::new(url));

    widget.submit("hello").await;
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);

    let state = widget.state();
    let state = state.lock().await;
    assert_eq!(state.messages().last(), Some(&Message::assistant(MISSING_KEY_REPLY)));
    assert!(!state.is_loading());
}
