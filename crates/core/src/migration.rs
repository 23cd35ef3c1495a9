// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The migration contract implemented by user code.

use async_trait::async_trait;
use mongodb::{ClientSession, Database};

/// A single schema migration: a versioned, reversible unit of work.
///
/// Versions are opaque strings ordered lexicographically; the recommended
/// convention is `YYYYMMDD_NNN` or `YYYYMMDD_HHMMSS` so that sort order
/// matches creation order.
///
/// The `session` argument is the executor's transaction session. Database
/// operations that pass it (`.session(&mut *session)`) participate in the
/// transaction when the deployment supports one; operations that ignore it
/// still run, but outside the transaction. Bodies must also tolerate being
/// re-run: when the deployment cannot provide transactions the executor
/// retries without one, and a crash between the data change and the record
/// write means the next `up` runs the body again.
#[async_trait]
pub trait Migration: Send + Sync {
    /// Unique version identifier, e.g. `"20240101_001"`.
    fn version(&self) -> &str;

    /// Human-readable summary of what the migration does.
    fn description(&self) -> &str;

    /// Apply the migration.
    async fn up(&self, db: &Database, session: &mut ClientSession) -> anyhow::Result<()>;

    /// Undo the migration.
    async fn down(&self, db: &Database, session: &mut ClientSession) -> anyhow::Result<()>;
}

/// Direction of a migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

#[cfg(test)]
#[path = "migration_tests.rs"]
mod tests;
