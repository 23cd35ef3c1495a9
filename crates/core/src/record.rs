// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent migration records and status reporting types.

use serde::{Deserialize, Serialize};

/// The persistent trace of an applied migration.
///
/// Exactly one record exists per applied version. Records are never mutated
/// after insertion; a successful revert deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationRecord {
    pub version: String,
    pub description: String,
    pub applied_at: bson::DateTime,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub checksum: String,
}

/// Status of a single migration as reported by `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationStatus {
    pub version: String,
    pub description: String,
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<bson::DateTime>,
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
