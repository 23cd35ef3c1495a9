// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Up command

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

#[derive(Args)]
pub struct UpArgs {
    /// Target version to migrate up to (inclusive); all pending if omitted
    #[arg(long)]
    pub target: Option<String>,
}

pub async fn run(args: UpArgs) -> Result<()> {
    let target = args.target.unwrap_or_default();

    if target.is_empty() {
        info!("running all pending migrations");
    } else {
        info!(version = %target, "running migrations up to target version");
    }

    let engine = super::engine_from_env().await?;
    engine.up(&target).await.context("migration up failed")?;

    println!("Database is up to date.");
    Ok(())
}
