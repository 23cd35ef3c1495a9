// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool catalog and result formatting.

use mongrate_core::MigrationStatus;
use mongrate_engine::schema::CollectionInfo;
use serde_json::{json, Value};

/// Tool names, shared between the catalog and the dispatcher.
pub const MIGRATION_STATUS: &str = "migration_status";
pub const MIGRATION_UP: &str = "migration_up";
pub const MIGRATION_DOWN: &str = "migration_down";
pub const MIGRATION_CREATE: &str = "migration_create";
pub const DATABASE_SCHEMA: &str = "database_schema";

/// The registered tools with their input schemas, as served by `tools/list`.
pub fn catalog() -> Value {
    json!([
        {
            "name": MIGRATION_STATUS,
            "description": "Get a list of all migrations and whether they have been applied to the database.",
            "inputSchema": {
                "type": "object",
                "properties": {}
            }
        },
        {
            "name": MIGRATION_UP,
            "description": "Apply pending migrations. If a version is provided, it migrates up to and including that version.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "version": { "type": "string", "description": "Target version such as 20240101_001" }
                }
            }
        },
        {
            "name": MIGRATION_DOWN,
            "description": "Roll back applied migrations. If a version is provided, it rolls back down to (but not including) that version; otherwise everything is rolled back.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "version": { "type": "string", "description": "Target version that stays applied" }
                }
            }
        },
        {
            "name": MIGRATION_CREATE,
            "description": "Generate a new migration source file.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "name":        { "type": "string", "description": "Migration name (e.g. add_users_collection)" },
                    "description": { "type": "string", "description": "Brief summary of what the migration does" }
                },
                "required": ["name"]
            }
        },
        {
            "name": DATABASE_SCHEMA,
            "description": "Get the schema of the database, including collections and their indexes.",
            "inputSchema": {
                "type": "object",
                "properties": {}
            }
        }
    ])
}

/// Render status as the markdown table returned by `migration_status`.
pub fn format_status(status: &[MigrationStatus]) -> String {
    let mut out = String::from("### Migration Status\n\n");
    out.push_str("| Version | Status | Applied At | Description |\n");
    out.push_str("| :--- | :--- | :--- | :--- |\n");

    for entry in status {
        let (state, at) = if entry.applied {
            let at = entry
                .applied_at
                .map(|dt| dt.to_chrono().format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "n/a".to_string());
            ("applied", at)
        } else {
            ("pending", "n/a".to_string())
        };
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            entry.version, state, at, entry.description
        ));
    }

    out
}

/// Render collections and indexes as the markdown returned by
/// `database_schema`.
pub fn format_schema(database: &str, collections: &[CollectionInfo]) -> String {
    let mut out = format!("### Database Schema for '{database}'\n\n");

    for coll in collections {
        out.push_str(&format!("#### Collection: `{}`\n\n", coll.name));
        out.push_str("| Index Name | Keys | Unique |\n");
        out.push_str("| :--- | :--- | :--- |\n");
        for index in &coll.indexes {
            out.push_str(&format!(
                "| `{}` | `{}` | {} |\n",
                index.name,
                index.keys,
                if index.unique { "Yes" } else { "No" }
            ));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
#[path = "tools_tests.rs"]
mod tests;
