use clap::Parser;

pub const DEFAULT_CHAT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1/models";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.0-flash";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Chat LLM Provider Args ---
    /// API key for the Gemini generateContent API. When unset the proxy answers every
    /// chat request with an error instead of contacting the API.
    #[arg(long, env = "GEMINI_API_KEY")]
    pub gemini_api_key: Option<String>,

    /// Model name used for generation (e.g., gemini-2.0-flash)
    #[arg(long, env = "CHAT_MODEL", default_value = DEFAULT_CHAT_MODEL)]
    pub chat_model: String,

    /// Base URL of the models collection; the model and ":generateContent" are appended.
    #[arg(long, env = "CHAT_BASE_URL", default_value = DEFAULT_CHAT_BASE_URL)]
    pub chat_base_url: String,

    /// Timeout in seconds for a single call to the generation API.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30")]
    pub request_timeout_secs: u64,

    // --- Persona Args ---
    /// Optional JSON file overriding the built-in persona (owner, description, greetings, trigger phrases).
    #[arg(long, env = "PERSONA_PATH")]
    pub persona_path: Option<String>,

    // --- General App Args ---
    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:3000")]
    pub server_addr: String,

    /// Optional path to the TLS certificate file (PEM format) for serving HTTPS. Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format) for serving HTTPS. Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}

impl Args {
    /// The configured credential, treating a blank value as absent.
    pub fn api_key(&self) -> Option<String> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_owned)
    }
}

/// Options for the terminal chat front-end.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Chat with the portfolio assistant from a terminal", long_about = None)]
pub struct ConsoleArgs {
    /// Endpoint of a running portfolio-chat proxy.
    #[arg(long, env = "PROXY_URL", default_value = "http://127.0.0.1:3000/api/gemini")]
    pub proxy_url: String,

    /// Optional JSON file overriding the built-in persona. Should match the proxy's.
    #[arg(long, env = "PERSONA_PATH")]
    pub persona_path: Option<String>,
}
