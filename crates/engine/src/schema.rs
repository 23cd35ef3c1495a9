// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only schema inspection: collections and their indexes.

use bson::{Bson, Document};
use futures::stream::TryStreamExt;
use mongodb::Database;

/// One index on a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexInfo {
    pub name: String,
    pub keys: String,
    pub unique: bool,
}

/// One collection with its indexes.
#[derive(Debug, Clone)]
pub struct CollectionInfo {
    pub name: String,
    pub indexes: Vec<IndexInfo>,
}

/// List every collection and its indexes, sorted by collection name.
pub async fn inspect(db: &Database) -> Result<Vec<CollectionInfo>, mongodb::error::Error> {
    let mut names = db.list_collection_names().await?;
    names.sort();

    let mut collections = Vec::with_capacity(names.len());
    for name in names {
        let coll = db.collection::<Document>(&name);
        let cursor = coll.list_indexes().await?;
        let models: Vec<mongodb::IndexModel> = cursor.try_collect().await?;

        let indexes = models
            .into_iter()
            .map(|model| {
                let options = model.options.unwrap_or_default();
                IndexInfo {
                    name: options.name.unwrap_or_else(|| "[unnamed]".to_string()),
                    keys: format_keys(&model.keys),
                    unique: options.unique.unwrap_or(false),
                }
            })
            .collect();

        collections.push(CollectionInfo { name, indexes });
    }

    Ok(collections)
}

/// `{"email": 1, "created_at": -1}` → `email: 1, created_at: -1`.
fn format_keys(keys: &Document) -> String {
    keys.iter()
        .map(|(field, order)| match order {
            Bson::Int32(n) => format!("{field}: {n}"),
            Bson::Int64(n) => format!("{field}: {n}"),
            Bson::Double(n) => format!("{field}: {n}"),
            other => format!("{field}: {other}"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
