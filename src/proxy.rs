use axum::{ Json, http::StatusCode, response::{ IntoResponse, Response } };
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use log::{ info, warn, error };

use crate::config::Persona;
use crate::llm::chat::{ ChatClient, LlmError };
use crate::models::api::{ ChatReply, FALLBACK_REPLY, MISSING_KEY_REPLY, SERVICE_ERROR_REPLY };
use crate::models::gemini::{
    GeminiContent,
    GeminiRole,
    GenerateContentRequest,
    REPLY_TEXT_POINTER,
};

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("generation API key is not configured")]
    MissingCredential,
    #[error(transparent)]
    Upstream(#[from] LlmError),
}

impl ProxyError {
    pub fn reply(&self) -> &'static str {
        match self {
            ProxyError::MissingCredential => MISSING_KEY_REPLY,
            ProxyError::Upstream(_) => SERVICE_ERROR_REPLY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = ChatReply { reply: self.reply().to_string() };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// What was read out of a successful generation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    Generated(String),
    /// The API answered but without usable text.
    Fallback,
}

impl ReplyOutcome {
    pub fn from_response(raw: &Value) -> Self {
        match raw.pointer(REPLY_TEXT_POINTER).and_then(Value::as_str) {
            Some(text) if !text.is_empty() => ReplyOutcome::Generated(text.to_string()),
            _ => ReplyOutcome::Fallback,
        }
    }

    pub fn into_reply(self) -> String {
        match self {
            ReplyOutcome::Generated(text) => text,
            ReplyOutcome::Fallback => FALLBACK_REPLY.to_string(),
        }
    }
}

/// Relays one chat message to the generation API.
///
/// Holds no conversation state: every call sends the same persona seed
/// followed by the caller's message.
#[derive(Clone)]
pub struct ChatProxy {
    client: Arc<dyn ChatClient>,
    api_key: Option<String>,
    persona: Arc<Persona>,
}

impl ChatProxy {
    pub fn new(client: Arc<dyn ChatClient>, api_key: Option<String>, persona: Arc<Persona>) -> Self {
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        if api_key.is_some() {
            info!(
                "Chat proxy configured: Model={}, BaseURL={}",
                client.get_model(),
                client.get_base_url()
            );
        } else {
            warn!("Chat proxy configured WITHOUT an API key. Chat requests will fail.");
        }
        Self { client, api_key, persona }
    }

    pub fn build_request(&self, message: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![
                GeminiContent::text(GeminiRole::User, self.persona.system_context()),
                GeminiContent::text(GeminiRole::Model, self.persona.model_greeting.clone()),
                GeminiContent::text(GeminiRole::User, message)
            ],
        }
    }

    pub async fn handle(&self, message: &str) -> Result<ReplyOutcome, ProxyError> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                warn!("Rejecting chat request: API key not set");
                return Err(ProxyError::MissingCredential);
            }
        };

        let request = self.build_request(message);
        let raw = match self.client.generate_content(api_key, &request).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("Error contacting generation API: {}", e);
                return Err(e.into());
            }
        };
        info!("Gemini API response: {}", raw);

        let outcome = ReplyOutcome::from_response(&raw);
        if outcome == ReplyOutcome::Fallback {
            warn!("Generation API response had no reply text; using fallback");
        }
        Ok(outcome)
    }
}
