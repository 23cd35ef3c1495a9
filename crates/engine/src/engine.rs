// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine facade: status, up, down, force, unlock.
//!
//! One engine per database target. Every mutating operation runs inside
//! the database-resident lock: acquire, load records, plan, execute,
//! release. The registry snapshot is taken at construction; migrations
//! registered afterwards are not visible to this engine.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use mongodb::Database;
use mongrate_core::{
    checksum, Direction, Migration, MigrationRecord, MigrationStatus,
    config::DEFAULT_MIGRATIONS_COLLECTION,
};
use thiserror::Error;
use tracing::info;

use crate::executor::{ExecuteError, Executor};
use crate::lock::{LockError, LockManager};
use crate::plan::plan;
use crate::store::{new_record, RecordStore};

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to read migration records: {0}")]
    Records(#[source] mongodb::error::Error),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error("checksum mismatch for {version}: recorded {recorded}, current {current}")]
    ChecksumMismatch {
        version: String,
        recorded: String,
        current: String,
    },

    #[error("unknown migration version: {0}")]
    MigrationNotFound(String),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("failed to write migration record: {0}")]
    RecordWrite(#[source] mongodb::error::Error),

    #[error("failed to release migration lock: {0}")]
    Unlock(#[source] mongodb::error::Error),
}

/// Migration engine over one database.
pub struct Engine {
    db: Database,
    migrations: BTreeMap<String, Arc<dyn Migration>>,
    store: RecordStore,
    lock: LockManager,
}

impl Engine {
    /// Build an engine over `db` with a registry snapshot.
    ///
    /// An empty `migrations_collection` selects the default; the lock
    /// collection is always derived from it (`<name>_lock`).
    pub fn new(
        db: Database,
        migrations_collection: &str,
        migrations: BTreeMap<String, Arc<dyn Migration>>,
    ) -> Self {
        let coll = if migrations_collection.is_empty() {
            DEFAULT_MIGRATIONS_COLLECTION
        } else {
            migrations_collection
        };

        Self {
            store: RecordStore::new(&db, coll),
            lock: LockManager::new(&db, &format!("{coll}_lock")),
            migrations,
            db,
        }
    }

    /// Status of every known migration, sorted ascending by version.
    ///
    /// Covers the union of registered and recorded versions; a record whose
    /// migration is no longer registered is still listed, with the stored
    /// description.
    pub async fn status(&self) -> Result<Vec<MigrationStatus>, EngineError> {
        let applied = self.store.applied().await.map_err(EngineError::Records)?;

        let registered: Vec<(String, String)> = self
            .migrations
            .iter()
            .map(|(version, m)| (version.clone(), m.description().to_string()))
            .collect();

        Ok(merge_status(&registered, &applied))
    }

    /// Apply pending migrations up to and including `target` (all pending
    /// when `target` is empty).
    pub async fn up(&self, target: &str) -> Result<(), EngineError> {
        self.run(Direction::Up, target).await
    }

    /// Revert applied migrations down to, but not including, `target`
    /// (everything when `target` is empty).
    pub async fn down(&self, target: &str) -> Result<(), EngineError> {
        if !target.is_empty() && !self.migrations.contains_key(target) {
            return Err(EngineError::MigrationNotFound(target.to_string()));
        }
        self.run(Direction::Down, target).await
    }

    /// Record `version` as applied without running its body.
    ///
    /// No-op when the version is already recorded, even if the stored
    /// description differs.
    pub async fn force(&self, version: &str) -> Result<(), EngineError> {
        let migration = self
            .migrations
            .get(version)
            .ok_or_else(|| EngineError::MigrationNotFound(version.to_string()))?;

        let applied = self.store.applied().await.map_err(EngineError::Records)?;
        if applied.contains_key(version) {
            info!(version, "migration already recorded; force is a no-op");
            return Ok(());
        }

        self.store
            .insert(&new_record(migration.as_ref()))
            .await
            .map_err(EngineError::RecordWrite)?;

        info!(version, "migration force-marked as applied");
        Ok(())
    }

    /// Unconditionally delete the lock document (operator escape hatch).
    pub async fn force_unlock(&self) -> Result<(), EngineError> {
        self.lock.force_unlock().await.map_err(EngineError::Unlock)
    }

    /// The critical section: acquire, plan, execute, release.
    async fn run(&self, direction: Direction, target: &str) -> Result<(), EngineError> {
        let guard = self.lock.acquire().await?;
        let result = self.run_locked(direction, target).await;
        guard.release().await;
        result
    }

    async fn run_locked(&self, direction: Direction, target: &str) -> Result<(), EngineError> {
        let applied = self.store.applied().await.map_err(EngineError::Records)?;

        if direction == Direction::Up {
            self.validate_checksums(&applied)?;
        }

        let versions: Vec<String> = self.migrations.keys().cloned().collect();
        let plan = plan(direction, target, &versions, &applied);

        let executor = Executor::new(&self.db, &self.store);
        for version in &plan {
            let migration = &self.migrations[version];
            info!(version = %version, direction = %direction, "executing migration");
            executor.execute(migration.as_ref(), direction).await?;
        }

        Ok(())
    }

    /// Compare stored checksums against the in-code migrations.
    ///
    /// Runs over every registered version that has a record, before the
    /// first body executes, so an edited migration aborts the run even
    /// when it no longer appears in the plan.
    fn validate_checksums(
        &self,
        applied: &HashMap<String, MigrationRecord>,
    ) -> Result<(), EngineError> {
        for (version, migration) in &self.migrations {
            let Some(record) = applied.get(version) else {
                continue;
            };
            if record.checksum.is_empty() {
                // Pre-checksum records are trusted as-is.
                continue;
            }

            let current = checksum(version, migration.description());
            if record.checksum != current {
                return Err(EngineError::ChecksumMismatch {
                    version: version.clone(),
                    recorded: record.checksum.clone(),
                    current,
                });
            }
        }
        Ok(())
    }
}

/// Merge registered descriptions with applied records into a sorted status
/// listing.
fn merge_status(
    registered: &[(String, String)],
    applied: &HashMap<String, MigrationRecord>,
) -> Vec<MigrationStatus> {
    let mut by_version: BTreeMap<String, MigrationStatus> = registered
        .iter()
        .map(|(version, description)| {
            let record = applied.get(version);
            (
                version.clone(),
                MigrationStatus {
                    version: version.clone(),
                    description: description.clone(),
                    applied: record.is_some(),
                    applied_at: record.map(|r| r.applied_at),
                },
            )
        })
        .collect();

    for (version, record) in applied {
        by_version
            .entry(version.clone())
            .or_insert_with(|| MigrationStatus {
                version: version.clone(),
                description: record.description.clone(),
                applied: true,
                applied_at: Some(record.applied_at),
            });
    }

    by_version.into_values().collect()
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
