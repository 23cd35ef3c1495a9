// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checksum tests

use super::*;

#[test]
fn checksum_is_deterministic() {
    let a = checksum("20240101_001", "users");
    let b = checksum("20240101_001", "users");
    assert_eq!(a, b);
}

#[test]
fn checksum_is_lowercase_hex_sha256() {
    let sum = checksum("20240101_001", "users");
    assert_eq!(sum.len(), 64);
    assert!(sum.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn checksum_changes_with_description() {
    assert_ne!(
        checksum("20240101_002", "indexes"),
        checksum("20240101_002", "indexes v2"),
    );
}

#[test]
fn checksum_changes_with_version() {
    assert_ne!(
        checksum("20240101_001", "users"),
        checksum("20240101_002", "users"),
    );
}

#[test]
fn separator_prevents_ambiguity() {
    // "ab" + "c" and "a" + "bc" must not collide.
    assert_ne!(checksum("ab", "c"), checksum("a", "bc"));
}
