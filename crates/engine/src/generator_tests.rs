// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generator tests

use super::*;

#[test]
fn slugify_cleans_names() {
    assert_eq!(slugify("Add User Indexes"), "add_user_indexes");
    assert_eq!(slugify("drop-legacy-fields"), "drop_legacy_fields");
    assert_eq!(slugify("weird!!name"), "weirdname");
}

#[test]
fn camel_case_builds_struct_names() {
    assert_eq!(camel_case("add_user_indexes"), "AddUserIndexes");
    assert_eq!(camel_case("users"), "Users");
    assert_eq!(camel_case("a__b"), "AB");
}

#[test]
fn generate_writes_stub() {
    let dir = tempfile::tempdir().expect("tempdir");

    let generated = generate(dir.path(), "Add User Indexes", "unique email index")
        .expect("generate failed");

    assert!(generated.path.exists());
    assert_eq!(generated.struct_name, "AddUserIndexes");
    assert!(generated
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with("_add_user_indexes.rs")));

    let source = std::fs::read_to_string(&generated.path).expect("read stub");
    assert!(source.contains("pub struct AddUserIndexes"));
    assert!(source.contains(&generated.version));
    assert!(source.contains("unique email index"));
    assert!(!source.contains("{struct_name}"), "unexpanded placeholder");
}

#[test]
fn generate_creates_missing_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("db").join("migrations");

    let generated = generate(&nested, "users", "").expect("generate failed");
    assert!(generated.path.starts_with(&nested));

    // Empty description falls back to the name.
    let source = std::fs::read_to_string(&generated.path).expect("read stub");
    assert!(source.contains("\"users\""));
}
