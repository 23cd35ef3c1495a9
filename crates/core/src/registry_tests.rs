// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry tests

use super::*;
use mongodb::{ClientSession, Database};

struct Stub {
    version: &'static str,
}

#[async_trait::async_trait]
impl Migration for Stub {
    fn version(&self) -> &str {
        self.version
    }
    fn description(&self) -> &str {
        "stub"
    }
    async fn up(&self, _: &Database, _: &mut ClientSession) -> anyhow::Result<()> {
        Ok(())
    }
    async fn down(&self, _: &Database, _: &mut ClientSession) -> anyhow::Result<()> {
        Ok(())
    }
}

fn stub(version: &'static str) -> Arc<dyn Migration> {
    Arc::new(Stub { version })
}

#[test]
fn register_and_snapshot_sorted() {
    let mut registry = Registry::new();
    registry.register(stub("20240102_001"));
    registry.register(stub("20240101_001"));

    let snapshot = registry.snapshot();
    let versions: Vec<_> = snapshot.keys().cloned().collect();
    assert_eq!(versions, vec!["20240101_001", "20240102_001"]);
}

#[test]
#[should_panic(expected = "duplicate migration version")]
fn duplicate_version_panics() {
    let mut registry = Registry::new();
    registry.register(stub("20240101_001"));
    registry.register(stub("20240101_001"));
}

#[test]
fn snapshot_is_defensive() {
    let mut registry = Registry::new();
    registry.register(stub("20240101_001"));

    let mut snapshot = registry.snapshot();
    snapshot.clear();

    assert_eq!(registry.len(), 1);
}

#[test]
fn empty_registry() {
    let registry = Registry::new();
    assert!(registry.is_empty());
    assert!(registry.snapshot().is_empty());
}
