// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent log of applied migrations.

use std::collections::HashMap;

use bson::doc;
use futures::stream::TryStreamExt;
use mongodb::{ClientSession, Collection, Database};
use mongrate_core::{checksum, Migration, MigrationRecord};

/// Typed access to the migrations collection.
pub struct RecordStore {
    coll: Collection<MigrationRecord>,
}

impl RecordStore {
    pub fn new(db: &Database, collection: &str) -> Self {
        Self {
            coll: db.collection(collection),
        }
    }

    /// Load every record, keyed by version.
    pub async fn applied(&self) -> Result<HashMap<String, MigrationRecord>, mongodb::error::Error> {
        let cursor = self.coll.find(doc! {}).sort(doc! { "version": 1 }).await?;
        let records: Vec<MigrationRecord> = cursor.try_collect().await?;

        Ok(records
            .into_iter()
            .map(|record| (record.version.clone(), record))
            .collect())
    }

    /// Insert a record outside any session (used by `force`).
    pub async fn insert(&self, record: &MigrationRecord) -> Result<(), mongodb::error::Error> {
        self.coll.insert_one(record).await?;
        Ok(())
    }

    /// Insert a record inside the executor's session.
    pub async fn insert_in(
        &self,
        record: &MigrationRecord,
        session: &mut ClientSession,
    ) -> Result<(), mongodb::error::Error> {
        self.coll.insert_one(record).session(session).await?;
        Ok(())
    }

    /// Delete the record for `version` inside the executor's session.
    pub async fn delete_in(
        &self,
        version: &str,
        session: &mut ClientSession,
    ) -> Result<(), mongodb::error::Error> {
        self.coll
            .delete_one(doc! { "version": version })
            .session(session)
            .await?;
        Ok(())
    }
}

/// Build the record for a migration being applied now.
pub fn new_record(migration: &dyn Migration) -> MigrationRecord {
    MigrationRecord {
        version: migration.version().to_string(),
        description: migration.description().to_string(),
        applied_at: bson::DateTime::now(),
        checksum: checksum(migration.version(), migration.description()),
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
