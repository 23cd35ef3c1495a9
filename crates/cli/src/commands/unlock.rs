// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unlock command

use anyhow::{Context, Result};

pub async fn run() -> Result<()> {
    let engine = super::engine_from_env().await?;
    engine
        .force_unlock()
        .await
        .context("failed to delete migration lock")?;

    println!("Migration lock cleared.");
    Ok(())
}
