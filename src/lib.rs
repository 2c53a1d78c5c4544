pub mod cli;
pub mod config;
pub mod llm;
pub mod models;
pub mod proxy;
pub mod server;
pub mod widget;

use cli::Args;
use config::resolve_persona;
use llm::LlmConfig;
use llm::chat::new_client as new_chat_client;
use log::info;
use proxy::ChatProxy;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let api_key = args.api_key();

    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Chat Model: {}", args.chat_model);
    info!("Chat Base URL: {}", args.chat_base_url);
    info!("Request Timeout: {}s", args.request_timeout_secs);
    info!("API Key Configured: {}", api_key.is_some());
    info!("Persona Path: {}", args.persona_path.as_deref().unwrap_or("built-in"));
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let persona = resolve_persona(args.persona_path.as_deref())?;
    let chat_client = new_chat_client(&LlmConfig::from_args(&args))?;
    let proxy = Arc::new(ChatProxy::new(chat_client, api_key, persona));

    let addr = args.server_addr.clone();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, proxy, args);
    server.run().await?;

    Ok(())
}
