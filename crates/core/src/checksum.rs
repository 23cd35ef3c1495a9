// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Migration identity checksums.
//!
//! The checksum is stored on each record and compared against the in-code
//! migration on later runs, so a silently edited migration is caught
//! before any data is touched.

use sha2::{Digest, Sha256};

/// Compute the checksum of a migration's identity.
///
/// The digest covers `version:description`; changing either after a
/// migration has been applied produces a mismatch.
pub fn checksum(version: &str, description: &str) -> String {
    let digest = Sha256::digest(format!("{version}:{description}").as_bytes());
    hex::encode(digest)
}

#[cfg(test)]
#[path = "checksum_tests.rs"]
mod tests;
