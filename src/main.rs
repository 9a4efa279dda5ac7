//! Marketplace Chat Server - Entry Point
//!
//! Starts the ChatServer actor, the WebSocket accept loop and the HTTP
//! query endpoints.

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use market_chat::{accept_loop, api, ChatServer, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=market_chat=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("market_chat=info,tower_http=info")),
        )
        .init();

    let config = Config::parse();
    let origin = config.client_origin()?;

    let (cmd_tx, cmd_rx) = mpsc::channel(config.channel_buffer);
    tokio::spawn(ChatServer::new(cmd_rx).run());
    info!("ChatServer actor started");

    let http_listener = TcpListener::bind(config.http_addr).await?;
    info!("HTTP endpoints listening on {}", config.http_addr);
    let app = api::router(cmd_tx.clone(), origin);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(http_listener, app).await {
            error!("HTTP server error: {}", e);
        }
    });

    let ws_listener = TcpListener::bind(config.ws_addr).await?;
    info!("WebSocket relay listening on {}", config.ws_addr);
    accept_loop(ws_listener, cmd_tx).await;

    Ok(())
}
