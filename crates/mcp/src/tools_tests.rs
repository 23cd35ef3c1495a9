// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool catalog and formatting tests

use mongrate_engine::schema::IndexInfo;

use super::*;

#[test]
fn catalog_contains_required_tools() {
    let catalog = catalog();
    let names: Vec<&str> = catalog
        .as_array()
        .unwrap()
        .iter()
        .map(|tool| tool["name"].as_str().unwrap())
        .collect();

    for required in [
        MIGRATION_STATUS,
        MIGRATION_UP,
        MIGRATION_DOWN,
        MIGRATION_CREATE,
        DATABASE_SCHEMA,
    ] {
        assert!(names.contains(&required), "missing tool: {required}");
    }
}

#[test]
fn catalog_entries_have_schemas() {
    let catalog = catalog();
    for tool in catalog.as_array().unwrap() {
        assert!(tool["description"].is_string());
        assert_eq!(tool["inputSchema"]["type"], "object");
    }
}

#[test]
fn create_requires_name() {
    let catalog = catalog();
    let create = catalog
        .as_array()
        .unwrap()
        .iter()
        .find(|tool| tool["name"] == MIGRATION_CREATE)
        .expect("migration_create missing");

    assert_eq!(create["inputSchema"]["required"][0], "name");
}

#[test]
fn status_table_marks_applied_and_pending() {
    let status = vec![
        MigrationStatus {
            version: "20240101_001".to_string(),
            description: "users".to_string(),
            applied: true,
            applied_at: Some(bson::DateTime::from_millis(1_704_067_200_000)),
        },
        MigrationStatus {
            version: "20240101_002".to_string(),
            description: "indexes".to_string(),
            applied: false,
            applied_at: None,
        },
    ];

    let table = format_status(&status);
    assert!(table.contains("| 20240101_001 | applied | 2024-01-01 00:00 | users |"));
    assert!(table.contains("| 20240101_002 | pending | n/a | indexes |"));
}

#[test]
fn schema_table_lists_indexes() {
    let collections = vec![CollectionInfo {
        name: "users".to_string(),
        indexes: vec![IndexInfo {
            name: "idx_users_email".to_string(),
            keys: "email: 1".to_string(),
            unique: true,
        }],
    }];

    let text = format_schema("app", &collections);
    assert!(text.contains("Database Schema for 'app'"));
    assert!(text.contains("#### Collection: `users`"));
    assert!(text.contains("| `idx_users_email` | `email: 1` | Yes |"));
}
