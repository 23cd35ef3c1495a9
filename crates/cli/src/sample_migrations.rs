// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in example migrations, registered by `mongrate mcp --with-examples`
//! so the tool can be exercised against a scratch database without writing
//! any migration code first.

use std::sync::Arc;

use async_trait::async_trait;
use bson::{doc, Document};
use mongodb::options::{CreateCollectionOptions, IndexOptions};
use mongodb::{ClientSession, Database, IndexModel};
use mongrate_core::{register, Migration};

/// Register the example migrations with the global registry.
///
/// Must run before the engine is constructed; call it at most once per
/// process (duplicate registration is fatal by design).
pub fn register_samples() {
    register([
        Arc::new(CreateUsersCollection) as Arc<dyn Migration>,
        Arc::new(CreateAuditLogCollection) as Arc<dyn Migration>,
    ]);
}

/// Users collection with schema validation and unique lookup indexes.
struct CreateUsersCollection;

#[async_trait]
impl Migration for CreateUsersCollection {
    fn version(&self) -> &str {
        "20251207_100000"
    }

    fn description(&self) -> &str {
        "Create users collection with schema validation and indexes"
    }

    async fn up(&self, db: &Database, session: &mut ClientSession) -> anyhow::Result<()> {
        let validator = doc! {
            "$jsonSchema": {
                "bsonType": "object",
                "required": ["email", "username", "created_at"],
                "properties": {
                    "email":      { "bsonType": "string" },
                    "username":   { "bsonType": "string" },
                    "is_active":  { "bsonType": "bool" },
                    "created_at": { "bsonType": "date" },
                },
            },
        };

        db.create_collection("users")
            .with_options(
                CreateCollectionOptions::builder()
                    .validator(validator)
                    .build(),
            )
            .session(&mut *session)
            .await?;

        let indexes = [
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_users_email".to_string())
                        .unique(true)
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_users_username".to_string())
                        .unique(true)
                        .build(),
                )
                .build(),
        ];

        db.collection::<Document>("users")
            .create_indexes(indexes)
            .session(session)
            .await?;
        Ok(())
    }

    async fn down(&self, db: &Database, session: &mut ClientSession) -> anyhow::Result<()> {
        db.collection::<Document>("users")
            .drop()
            .session(session)
            .await?;
        Ok(())
    }
}

/// Append-only audit log keyed by creation time.
struct CreateAuditLogCollection;

#[async_trait]
impl Migration for CreateAuditLogCollection {
    fn version(&self) -> &str {
        "20251207_100500"
    }

    fn description(&self) -> &str {
        "Create audit_log collection with a created_at index"
    }

    async fn up(&self, db: &Database, session: &mut ClientSession) -> anyhow::Result<()> {
        db.create_collection("audit_log")
            .session(&mut *session)
            .await?;

        db.collection::<Document>("audit_log")
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "created_at": -1 })
                    .options(
                        IndexOptions::builder()
                            .name("idx_audit_log_created_at".to_string())
                            .build(),
                    )
                    .build(),
            )
            .session(session)
            .await?;
        Ok(())
    }

    async fn down(&self, db: &Database, session: &mut ClientSession) -> anyhow::Result<()> {
        db.collection::<Document>("audit_log")
            .drop()
            .session(session)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "sample_migrations_tests.rs"]
mod tests;
