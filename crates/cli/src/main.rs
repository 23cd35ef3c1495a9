// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! mongrate - MongoDB schema migrations

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod sample_migrations;
mod table;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{create, down, force, mcp, status, unlock, up};

#[derive(Parser)]
#[command(
    name = "mongrate",
    version,
    about = "MongoDB schema migrations with a distributed lock and MCP server"
)]
struct Cli {
    /// Enable debug (verbose) logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show migration status
    Status,
    /// Run all pending migrations (or up to a target version)
    Up(up::UpArgs),
    /// Roll back migrations (down to a target version, which stays applied)
    Down(down::DownArgs),
    /// Force mark a migration as applied without running it
    Force(force::ForceArgs),
    /// Delete the migration lock left behind by a dead migrator
    Unlock,
    /// Create a new migration file
    Create(create::CreateArgs),
    /// Serve the engine over MCP on stdio
    Mcp(mcp::McpArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    if let Err(err) = run(cli.command).await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Status => status::run().await,
        Commands::Up(args) => up::run(args).await,
        Commands::Down(args) => down::run(args).await,
        Commands::Force(args) => force::run(args).await,
        Commands::Unlock => unlock::run().await,
        Commands::Create(args) => create::run(args),
        Commands::Mcp(args) => mcp::run(args).await,
    }
}

/// Log to stderr so stdout stays clean for command output and the MCP
/// protocol stream.
fn setup_logging(debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
