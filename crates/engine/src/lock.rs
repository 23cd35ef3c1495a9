// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Database-resident migration lock.
//!
//! The lock is an insert into a uniquely-indexed collection: whoever gets
//! the document in owns the critical section. A TTL index on `acquired_at`
//! clears the document if the owner crashes without releasing, so a dead
//! migrator cannot wedge the fleet for longer than the expiry.
//!
//! The expiry is a fixed 10 minutes and must exceed the longest reasonable
//! migration run; a migration that legitimately outlives it risks a second
//! migrator entering the critical section. Not re-entrant.

use bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use thiserror::Error;
use tracing::{debug, warn};

/// Sentinel `lock_id` of the engine-wide lock document.
const LOCK_ID: &str = "migration_engine_lock";

/// TTL on `acquired_at` for crash recovery.
const LOCK_TTL: std::time::Duration = std::time::Duration::from_secs(600);

/// Lock errors
#[derive(Debug, Error)]
pub enum LockError {
    #[error("another migration is in progress; wait for it to finish or run unlock")]
    Held,

    #[error("failed to acquire migration lock: {0}")]
    Acquire(#[source] mongodb::error::Error),
}

/// Mutex over the migration critical section, shared by every migrator
/// targeting the same database.
pub struct LockManager {
    coll: Collection<Document>,
}

impl LockManager {
    pub fn new(db: &Database, collection: &str) -> Self {
        Self {
            coll: db.collection(collection),
        }
    }

    /// Try to take the lock.
    ///
    /// Returns [`LockError::Held`] when another migrator owns it. The
    /// returned guard releases on [`LockGuard::release`]; if the guard is
    /// dropped instead (caller cancelled), release is attempted on a
    /// spawned task, with the TTL as the fallback of last resort.
    pub async fn acquire(&self) -> Result<LockGuard, LockError> {
        self.ensure_indexes().await;

        let insert = self
            .coll
            .insert_one(doc! {
                "lock_id": LOCK_ID,
                "acquired_at": bson::DateTime::now(),
            })
            .await;

        match insert {
            Ok(_) => Ok(LockGuard {
                coll: self.coll.clone(),
                released: false,
            }),
            Err(err) if is_duplicate_key(&err) => Err(LockError::Held),
            Err(err) => Err(LockError::Acquire(err)),
        }
    }

    /// Unconditionally delete the lock document (operator escape hatch).
    pub async fn force_unlock(&self) -> Result<(), mongodb::error::Error> {
        self.coll.delete_many(doc! { "lock_id": LOCK_ID }).await?;
        Ok(())
    }

    /// Ensure the unique and TTL indexes exist.
    ///
    /// Best-effort: index creation races between concurrent migrators are
    /// harmless (identical definitions), and a failure here surfaces as an
    /// acquire failure anyway.
    async fn ensure_indexes(&self) {
        let indexes = [
            IndexModel::builder()
                .keys(doc! { "lock_id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "acquired_at": 1 })
                .options(IndexOptions::builder().expire_after(LOCK_TTL).build())
                .build(),
        ];

        if let Err(err) = self.coll.create_indexes(indexes).await {
            debug!(error = %err, "lock index creation failed");
        }
    }
}

/// Ownership of the lock document.
pub struct LockGuard {
    coll: Collection<Document>,
    released: bool,
}

impl LockGuard {
    /// Delete the lock document.
    ///
    /// Best-effort: a release failure is logged, not propagated — the TTL
    /// index clears the document within the expiry.
    pub async fn release(mut self) {
        self.released = true;
        if let Err(err) = self.coll.delete_one(doc! { "lock_id": LOCK_ID }).await {
            warn!(error = %err, "failed to release migration lock; TTL will clear it");
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        // The owning future was dropped before an explicit release. Spawn
        // the delete on a fresh task so a cancelled caller still releases.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let coll = self.coll.clone();
            handle.spawn(async move {
                if let Err(err) = coll.delete_one(doc! { "lock_id": LOCK_ID }).await {
                    warn!(error = %err, "failed to release migration lock on drop");
                }
            });
        }
    }
}

/// Duplicate-key write error, i.e. the unique index rejected the insert.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write)) => write.code == 11000,
        _ => false,
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
