// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Migration contract tests

use super::*;

#[test]
fn direction_display() {
    assert_eq!(Direction::Up.to_string(), "up");
    assert_eq!(Direction::Down.to_string(), "down");
}

#[test]
fn trait_is_object_safe() {
    fn assert_dyn(_: &dyn Migration) {}

    struct Noop;

    #[async_trait::async_trait]
    impl Migration for Noop {
        fn version(&self) -> &str {
            "20240101_001"
        }
        fn description(&self) -> &str {
            "noop"
        }
        async fn up(&self, _: &Database, _: &mut ClientSession) -> anyhow::Result<()> {
            Ok(())
        }
        async fn down(&self, _: &Database, _: &mut ClientSession) -> anyhow::Result<()> {
            Ok(())
        }
    }

    assert_dyn(&Noop);
}
