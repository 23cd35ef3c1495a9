// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Down command

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

#[derive(Args)]
pub struct DownArgs {
    /// Target version to roll back to; it stays applied
    #[arg(long, required = true)]
    pub target: String,
}

pub async fn run(args: DownArgs) -> Result<()> {
    info!(version = %args.target, "starting rollback");

    let engine = super::engine_from_env().await?;
    engine
        .down(&args.target)
        .await
        .context("migration down failed")?;

    println!("Rollback completed; {} remains applied.", args.target);
    Ok(())
}
