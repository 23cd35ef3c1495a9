// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Create command

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use mongrate_core::Config;
use mongrate_engine::generate;

#[derive(Args)]
pub struct CreateArgs {
    /// Migration name (e.g. add_users_collection)
    pub name: String,

    /// Brief summary of what the migration does
    #[arg(long, default_value = "")]
    pub description: String,
}

pub fn run(args: CreateArgs) -> Result<()> {
    let config = Config::from_env().context("config load failed")?;

    let generated = generate(
        Path::new(&config.migrations_path),
        &args.name,
        &args.description,
    )?;

    println!("Created migration: {}", generated.path.display());
    println!();
    println!("Next steps:");
    println!("  1. Open {}", generated.path.display());
    println!("  2. Implement up() and down()");
    println!(
        "  3. Register {} in your binary before building the engine",
        generated.struct_name
    );
    println!(
        "  4. Run 'mongrate up --target {}'",
        generated.version
    );

    Ok(())
}
