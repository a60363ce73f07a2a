//! gsearch server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use gsearch_client::{GoogleClient, GoogleConfig, HttpContentExtractor};
use gsearch_core::AppConfig;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    if let Err(e) = config.require_google_credentials() {
        tracing::warn!("google_search will fail until credentials are set: {}", e);
    }

    let search = GoogleClient::new(GoogleConfig::from_app_config(&config)).context("failed to build Google client")?;
    let extractor = HttpContentExtractor::from_app_config(&config).context("failed to build content extractor")?;
    let registry = Arc::new(tools::ToolRegistry::new().context("failed to build tool registry")?);

    tracing::info!(tools = registry.tools().len(), "Starting google-search-engine server on stdio transport");

    let handler = handler::GoogleSearchServer::new(registry, Arc::new(search), Arc::new(extractor));
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
