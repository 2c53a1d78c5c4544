use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GenerateContentRequest {
    pub contents: Vec<GeminiContent>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GeminiRole {
    User,
    Model,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeminiContent {
    pub role: GeminiRole,
    pub parts: Vec<GeminiPart>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeminiPart {
    pub text: String,
}

impl GeminiContent {
    pub fn text(role: GeminiRole, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![GeminiPart { text: text.into() }],
        }
    }
}

/// Location of the reply in a `generateContent` response. Nothing else in the body is read.
pub const REPLY_TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";
