pub mod chat;

use std::time::Duration;
use crate::cli::Args;

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub completion_model: String,
    pub timeout: Duration,
}

impl LlmConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            base_url: args.chat_base_url.clone(),
            completion_model: args.chat_model.clone(),
            timeout: Duration::from_secs(args.request_timeout_secs),
        }
    }
}
