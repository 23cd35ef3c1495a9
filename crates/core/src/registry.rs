// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide migration registry.
//!
//! User migration modules call [`register`] at startup (typically from the
//! binary's `main` before any engine is constructed). The engine takes a
//! snapshot at construction time; later registrations are not visible to
//! already-constructed engines.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::migration::Migration;

/// A set of known migrations keyed by version.
///
/// Writes are serialised behind a mutex in the global instance; registration
/// happens during startup, reads dominate afterwards.
#[derive(Default)]
pub struct Registry {
    migrations: BTreeMap<String, Arc<dyn Migration>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a migration.
    ///
    /// Panics on a duplicate version: two migrations claiming the same
    /// version is a programmer error that must not reach a database.
    pub fn register(&mut self, migration: Arc<dyn Migration>) {
        let version = migration.version().to_string();
        if self.migrations.contains_key(&version) {
            panic!("duplicate migration version registered: {version}");
        }
        self.migrations.insert(version, migration);
    }

    /// Defensive copy of the version → migration mapping, sorted by version.
    pub fn snapshot(&self) -> BTreeMap<String, Arc<dyn Migration>> {
        self.migrations.clone()
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }
}

static GLOBAL: Mutex<Option<Registry>> = Mutex::new(None);

/// Add one or more migrations to the global registry.
///
/// Panics on duplicate versions, matching [`Registry::register`].
pub fn register<I>(migrations: I)
where
    I: IntoIterator<Item = Arc<dyn Migration>>,
{
    let mut guard = GLOBAL.lock();
    let registry = guard.get_or_insert_with(Registry::new);
    for migration in migrations {
        registry.register(migration);
    }
}

/// Snapshot of the global registry.
pub fn registered_migrations() -> BTreeMap<String, Arc<dyn Migration>> {
    GLOBAL.lock().as_ref().map(Registry::snapshot).unwrap_or_default()
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
