//! Newsletter Builder MCP Server
//!
//! This MCP server lets AI agents drive the newsletter builder API.
//! Configuration comes from environment variables and it exposes tools for:
//! - Listing fonts, limits and defaults
//! - Previewing and saving newsletters
//! - Listing, fetching and deleting saved newsletters

mod client;
mod server;

use anyhow::{Context, Result};
use rmcp::ServiceExt;
use server::NewsletterServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let server = NewsletterServer::from_env().context("Failed to configure API client")?;
    tracing::info!(api_url = %server.api_url(), "Starting newsletter MCP server");

    let service = server
        .serve((tokio::io::stdin(), tokio::io::stdout()))
        .await
        .context("Failed to start MCP service")?;

    let reason = service.waiting().await?;
    tracing::info!(?reason, "MCP session ended");

    Ok(())
}
