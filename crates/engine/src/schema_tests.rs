// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Index key formatting tests

use bson::doc;

use super::*;

#[test]
fn format_keys_single_field() {
    assert_eq!(format_keys(&doc! { "email": 1 }), "email: 1");
}

#[test]
fn format_keys_compound_preserves_order() {
    let keys = doc! { "email": 1, "created_at": -1 };
    assert_eq!(format_keys(&keys), "email: 1, created_at: -1");
}

#[test]
fn format_keys_text_index() {
    let keys = doc! { "body": "text" };
    assert_eq!(format_keys(&keys), "body: \"text\"");
}
