// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command handlers

pub mod create;
pub mod down;
pub mod force;
pub mod mcp;
pub mod status;
pub mod unlock;
pub mod up;

use anyhow::{Context, Result};
use mongrate_core::{registered_migrations, Config};
use mongrate_engine::{connect, Engine};

/// Connect and build an engine from the environment.
///
/// Shared by every command that talks to the database directly; the MCP
/// server manages its own lazy connection instead.
pub(crate) async fn engine_from_env() -> Result<Engine> {
    let config = Config::from_env().context("config load failed")?;
    let client = connect(&config).await?;
    let db = client.database(&config.database);

    let migrations = registered_migrations();
    tracing::debug!(registered = migrations.len(), "engine initialized");

    Ok(Engine::new(db, &config.migrations_collection, migrations))
}
