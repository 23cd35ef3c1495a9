// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Classifier tests (transactional behavior is covered in tests/live.rs)

use super::*;

fn driver_error(message: &str) -> mongodb::error::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message.to_string()).into()
}

#[test]
fn unrelated_error_is_not_unsupported() {
    assert!(!is_unsupported(&driver_error("connection reset by peer")));
}

#[test]
fn message_fallback_matches_phrase() {
    // Errors that reach the fallback arm are matched on message text.
    assert!(is_unsupported(&driver_error(
        "Transactions are not supported by this deployment"
    )));
}

#[test]
fn body_error_classification_requires_driver_error() {
    let err = ExecuteError::Body {
        version: "20240101_001".to_string(),
        direction: Direction::Up,
        source: anyhow::anyhow!("validation failed"),
    };
    assert!(!err.transactions_unsupported());
}

#[test]
fn body_error_with_driver_source_is_classified() {
    let err = ExecuteError::Body {
        version: "20240101_001".to_string(),
        direction: Direction::Up,
        source: anyhow::Error::new(driver_error("transactions are not supported here")),
    };
    assert!(err.transactions_unsupported());
}

#[test]
fn error_messages_name_version_and_phase() {
    let err = ExecuteError::Record {
        version: "20240101_002".to_string(),
        source: driver_error("write failed"),
    };
    let text = err.to_string();
    assert!(text.contains("20240101_002"));
    assert!(text.contains("record write"));
}
