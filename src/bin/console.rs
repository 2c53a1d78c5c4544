use clap::Parser;
use dotenv::dotenv;
use portfolio_chat::cli::ConsoleArgs;
use portfolio_chat::config::resolve_persona;
use portfolio_chat::widget::{ ChatWidget, HttpProxyTransport, ProxyTransport, Submission };
use std::error::Error;
use tokio::io::{ AsyncBufReadExt, BufReader };
use log::info;

/// Prints every bubble past `printed` and returns the new count.
async fn print_new<T>(widget: &ChatWidget<T>, printed: usize) -> usize
    where T: ProxyTransport
{
    let state = widget.state();
    let state = state.lock().await;
    if !state.is_open() {
        return printed;
    }
    for bubble in state.transcript().skip(printed) {
        println!("{}", bubble);
    }
    state.messages().len()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = ConsoleArgs::parse();

    let persona = resolve_persona(args.persona_path.as_deref())?;
    info!("Talking to proxy at {}", args.proxy_url);
    let widget = ChatWidget::new(persona, HttpProxyTransport::new(args.proxy_url));
    widget.open().await;

    let owner = widget.state().lock().await.persona().owner.clone();
    println!("Chatting with {}'s assistant. Commands: /open, /close, /reset, /quit", owner);
    let mut printed = print_new(&widget, 0).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/open" => {
                if !widget.open().await {
                    continue;
                }
                printed = 0;
            }
            "/close" => {
                widget.close().await;
                continue;
            }
            "/reset" => {
                widget.state().lock().await.reset();
                printed = 0;
            }
            _ => {
                widget.set_input(line).await;
                if widget.submit_input().await == Submission::Ignored {
                    continue;
                }
            }
        }
        printed = print_new(&widget, printed).await;
    }

    Ok(())
}
