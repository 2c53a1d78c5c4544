use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;
use log::{ info, debug };

use super::{ ChatClient, LlmError };
use crate::llm::LlmConfig;
use crate::models::gemini::GenerateContentRequest;

pub struct GeminiChatClient {
    http: Client,
    model: String,
    base_url: String,
}

impl GeminiChatClient {
    pub fn new(
        base_url: String,
        model: String,
        timeout: std::time::Duration
    ) -> Result<Self, LlmError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, model, base_url })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        Self::new(config.base_url.clone(), config.completion_model.clone(), config.timeout)
    }

    /// `{base_url}/{model}:generateContent?key={api_key}`
    fn endpoint(&self, api_key: &str) -> Result<Url, LlmError> {
        let mut url = Url::parse(
            &format!("{}/{}:generateContent", self.base_url.trim_end_matches('/'), self.model)
        )?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }
}

#[async_trait]
impl ChatClient for GeminiChatClient {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest
    ) -> Result<Value, LlmError> {
        info!(
            "GeminiChatClient::generate_content() → model={} base_url={} turns={}",
            self.model,
            self.base_url,
            request.contents.len()
        );
        let url = self.endpoint(api_key)?;

        // reqwest errors carry the request URL, which holds the key.
        let resp = self.http
            .post(url)
            .header("Content-Type", "application/json")
            .json(request)
            .send().await
            .map_err(|e| LlmError::Transport(e.without_url()))?;

        let status = resp.status();
        if !status.is_success() {
            debug!("Generation API answered with status {}", status);
            return Err(LlmError::Status(status.as_u16()));
        }

        resp.json::<Value>().await.map_err(|e| LlmError::Transport(e.without_url()))
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> String {
        self.base_url.clone()
    }
}
