pub mod gemini;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use super::LlmConfig;
use self::gemini::GeminiChatClient;
use crate::models::gemini::GenerateContentRequest;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request to generation API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generation API returned HTTP {0}")]
    Status(u16),
}

/// A backend able to run one `generateContent` call.
///
/// The raw JSON body is returned so callers can log it verbatim and decide
/// themselves how to read the reply out of it.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest
    ) -> Result<Value, LlmError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> String;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, LlmError> {
    let client: Arc<dyn ChatClient> = Arc::new(GeminiChatClient::from_config(config)?);
    Ok(client)
}
