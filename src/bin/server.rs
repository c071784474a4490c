//! Gamba Deck Web Server
//!
//! JSON API behind the Gamba Deck front end.

use anyhow::{Context, Result};
use gamba_deck::api::{create_app, AppState};
use gamba_deck::Config;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging — default to info for this crate, warn elsewhere.
    // Override with RUST_LOG, e.g. RUST_LOG=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,gamba_deck=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    // Load configuration
    let config = Config::from_env()?;
    let addr: SocketAddr = config
        .server_addr
        .parse()
        .with_context(|| format!("SERVER_ADDR is not a socket address: {}", config.server_addr))?;

    let key_configured = gamba_deck::KeyStore::new(config.key_store.clone()).has_secret();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║       GAMBA DECK - WEB SERVER  (not financial advice)        ║");
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║  Default model: {:<44} ║", config.default_model);
    println!("║  API key: {:<50} ║", if key_configured { "CONFIGURED" } else { "NOT SET" });
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let app = create_app(AppState::new(config));

    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    println!("  API:     http://{}/api", addr);
    println!("  Health:  http://{}/health", addr);
    println!();

    axum::serve(listener, app).await?;

    Ok(())
}
