// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! MCP server command

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use mongrate_core::Config;
use mongrate_mcp::McpServer;
use tokio::sync::Notify;
use tracing::info;

#[derive(Args)]
pub struct McpArgs {
    /// Register the built-in example migrations before serving
    #[arg(long)]
    pub with_examples: bool,
}

pub async fn run(args: McpArgs) -> Result<()> {
    if args.with_examples {
        crate::sample_migrations::register_samples();
    }

    let config = Config::from_env().context("config load failed")?;
    let server = McpServer::new(config);

    // Ctrl-C drains the pump and exits; the reader returning end-of-stream
    // does the same when the client goes away.
    let shutdown = Arc::new(Notify::new());
    let notifier = Arc::clone(&shutdown);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            notifier.notify_one();
        }
    });

    info!("starting MCP server on stdio");
    server
        .serve(tokio::io::stdin(), tokio::io::stdout(), shutdown)
        .await?;

    info!("MCP server stopped");
    Ok(())
}
