// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status command

use anyhow::{Context, Result};

use crate::table::{Column, Table};

pub async fn run() -> Result<()> {
    let engine = super::engine_from_env().await?;
    let status = engine
        .status()
        .await
        .context("failed to get migration status")?;

    if status.is_empty() {
        println!("No migrations found in the registry.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::new("STATE"),
        Column::new("VERSION"),
        Column::new("APPLIED AT"),
        Column::new("DESCRIPTION"),
    ]);

    for entry in &status {
        let state = if entry.applied { "[x]" } else { "[ ]" };
        let applied_at = entry
            .applied_at
            .map(|dt| dt.to_chrono().format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "n/a".to_string());

        table.add_row(vec![
            state.to_string(),
            entry.version.clone(),
            applied_at,
            entry.description.clone(),
        ]);
    }

    println!("{}", table.render());
    Ok(())
}
