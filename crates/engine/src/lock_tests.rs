// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock classifier tests (live behavior is covered in tests/live.rs)

use super::*;

#[test]
fn non_write_error_is_not_duplicate_key() {
    let err: mongodb::error::Error =
        std::io::Error::new(std::io::ErrorKind::Other, "connection reset").into();
    assert!(!is_duplicate_key(&err));
}

#[test]
fn lock_sentinel_is_stable() {
    // The sentinel is persisted state shared across releases; changing it
    // would let two versions of the tool migrate concurrently.
    assert_eq!(LOCK_ID, "migration_engine_lock");
    assert_eq!(LOCK_TTL.as_secs(), 600);
}
