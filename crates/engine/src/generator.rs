// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Migration file scaffolding.
//!
//! Writes a new migration source stub under the migrations directory,
//! versioned with the current timestamp so generated files sort in
//! creation order.

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

/// Generator errors
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("migration file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("failed to write migration file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A freshly generated migration stub.
#[derive(Debug)]
pub struct GeneratedMigration {
    pub path: PathBuf,
    pub version: String,
    pub struct_name: String,
}

/// Create a new migration stub in `dir`.
///
/// The version is `YYYYMMDD_HHMMSS` from the current UTC time; `name` is
/// slugified into the file name and camel-cased into the struct name.
pub fn generate(
    dir: &Path,
    name: &str,
    description: &str,
) -> Result<GeneratedMigration, GeneratorError> {
    let version = Utc::now().format("%Y%m%d_%H%M%S").to_string();
    let slug = slugify(name);
    let struct_name = camel_case(&slug);
    let path = dir.join(format!("{version}_{slug}.rs"));

    if path.exists() {
        return Err(GeneratorError::AlreadyExists(path));
    }

    let description = if description.is_empty() { name } else { description };
    let source = STUB
        .replace("{struct_name}", &struct_name)
        .replace("{version}", &version)
        .replace("{description}", description);

    std::fs::create_dir_all(dir).map_err(|source| GeneratorError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    std::fs::write(&path, source).map_err(|source| GeneratorError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(GeneratedMigration {
        path,
        version,
        struct_name,
    })
}

/// Lowercase, spaces and dashes to underscores, everything else dropped.
fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// `add_user_indexes` → `AddUserIndexes`.
fn camel_case(slug: &str) -> String {
    slug.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

const STUB: &str = r#"use async_trait::async_trait;
use mongodb::{ClientSession, Database};
use mongrate_core::Migration;

/// {description}
#[derive(Default)]
pub struct {struct_name};

#[async_trait]
impl Migration for {struct_name} {
    fn version(&self) -> &str {
        "{version}"
    }

    fn description(&self) -> &str {
        "{description}"
    }

    async fn up(&self, db: &Database, session: &mut ClientSession) -> anyhow::Result<()> {
        // let coll = db.collection::<bson::Document>("example");
        let _ = (db, session);
        Ok(())
    }

    async fn down(&self, db: &Database, session: &mut ClientSession) -> anyhow::Result<()> {
        let _ = (db, session);
        Ok(())
    }
}
"#;

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
