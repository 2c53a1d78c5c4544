use serde::{ Serialize, Deserialize };

/// Body the widget posts to the proxy.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

/// Body the proxy answers with, on success and on failure alike.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
}

/// Shown when the generation service cannot be reached, by the proxy and the widget alike.
pub const SERVICE_ERROR_REPLY: &str = "Sorry, there was an error contacting the AI service.";
pub const MISSING_KEY_REPLY: &str = "API key not set.";
pub const FALLBACK_REPLY: &str = "Sorry, I could not generate a reply.";
