// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Force command

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Args;
use tracing::{info, warn};

#[derive(Args)]
pub struct ForceArgs {
    /// Version to mark as applied
    pub version: String,

    /// Confirm the action without prompting
    #[arg(long, short)]
    pub yes: bool,
}

pub async fn run(args: ForceArgs) -> Result<()> {
    if !args.yes {
        warn!(version = %args.version, "force marking migration");
        println!(
            "WARNING: You are about to force mark migration {} as applied.",
            args.version
        );
        println!("This will NOT execute the migration logic.");
        print!("Are you sure you want to continue? (y/N): ");
        std::io::stdout().flush()?;

        let mut response = String::new();
        std::io::stdin().lock().read_line(&mut response)?;
        let response = response.trim().to_lowercase();

        if response != "y" && response != "yes" {
            info!("operation cancelled by user");
            return Ok(());
        }
    }

    let engine = super::engine_from_env().await?;
    engine.force(&args.version).await?;

    println!("Migration {} marked as applied.", args.version);
    Ok(())
}
