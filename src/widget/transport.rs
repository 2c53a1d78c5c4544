use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use log::debug;

use crate::models::api::{ ChatReply, ChatRequest };

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("proxy request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// How a widget reaches the chat proxy.
#[async_trait]
pub trait ProxyTransport: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, WidgetError>;
}

/// Posts `{message}` as JSON and reads `{reply}` back.
///
/// The status code is not inspected: the proxy answers failures with a
/// readable `{reply}` too, and that text is what the user should see.
pub struct HttpProxyTransport {
    http: Client,
    url: String,
}

impl HttpProxyTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self { http: Client::new(), url: url.into() }
    }
}

#[async_trait]
impl ProxyTransport for HttpProxyTransport {
    async fn send(&self, message: &str) -> Result<String, WidgetError> {
        let resp = self.http
            .post(&self.url)
            .json(&ChatRequest { message: message.to_string() })
            .send().await?;
        let status = resp.status();
        let body = resp.json::<ChatReply>().await?;
        if !status.is_success() {
            debug!("Proxy answered {} with reply {:?}", status, body.reply);
        }
        Ok(body.reply)
    }
}
