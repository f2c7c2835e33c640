//! Openverse MCP Server
//!
//! Openly-licensed image search via the Openverse API, exposed as MCP
//! tools over stdio.
//!
//! # Configuration
//! Set `OPENVERSE_API_URL` env var or configure in `~/.config/openverse-mcp.toml`

use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod client;
mod config;
mod essay;
mod server;
mod types;

use config::Config;
use server::OpenverseMcpServer;

/// Initialize tracing/logging
///
/// Logs go to stderr (stdout is reserved for the MCP protocol), filtered
/// via RUST_LOG with a default of `info` for this crate. Set
/// `LOG_FORMAT=json` for structured JSON output.
fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("openverse_mcp=info".parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    tracing::info!("Starting Openverse MCP Server");

    let config = Config::load()?;
    tracing::info!("Openverse API: {}", config.api.base_url);

    let server = OpenverseMcpServer::new(config);
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
