// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record construction tests

use super::*;
use mongrate_core::checksum;

struct Users;

#[async_trait::async_trait]
impl Migration for Users {
    fn version(&self) -> &str {
        "20240101_001"
    }
    fn description(&self) -> &str {
        "users"
    }
    async fn up(
        &self,
        _: &Database,
        _: &mut ClientSession,
    ) -> anyhow::Result<()> {
        Ok(())
    }
    async fn down(
        &self,
        _: &Database,
        _: &mut ClientSession,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

#[test]
fn new_record_snapshots_identity() {
    let record = new_record(&Users);

    assert_eq!(record.version, "20240101_001");
    assert_eq!(record.description, "users");
    assert_eq!(record.checksum, checksum("20240101_001", "users"));
    assert!(record.applied_at.timestamp_millis() > 0);
}
