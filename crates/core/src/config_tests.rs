// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config tests (serialised: they mutate process environment)

use super::*;
use serial_test::serial;

fn clear_env() {
    for var in [
        "MONGO_URL",
        "MONGO_DATABASE",
        "MONGO_MIGRATIONS_COLLECTION",
        "MONGO_MIGRATIONS_PATH",
        "MONGO_MIN_POOL_SIZE",
        "MONGO_MAX_POOL_SIZE",
        "MONGO_TIMEOUT_SECONDS",
        "MONGO_SSL",
        "MONGO_SSL_INSECURE",
    ] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn database_is_required() {
    clear_env();
    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::MissingDatabase)
    ));
}

#[test]
#[serial]
fn defaults_applied() {
    clear_env();
    std::env::set_var("MONGO_DATABASE", "app");

    let config = Config::from_env().unwrap();
    assert_eq!(config.url, "mongodb://localhost:27017");
    assert_eq!(config.migrations_collection, "schema_migrations");
    assert_eq!(config.migrations_path, "migrations");
    assert_eq!(config.timeout_secs, 10);
    assert_eq!(config.min_pool_size, None);
    assert!(!config.ssl_enabled);
}

#[test]
#[serial]
fn explicit_values_win() {
    clear_env();
    std::env::set_var("MONGO_DATABASE", "app");
    std::env::set_var("MONGO_URL", "mongodb://db.internal:27017");
    std::env::set_var("MONGO_MIGRATIONS_COLLECTION", "app_migrations");
    std::env::set_var("MONGO_MAX_POOL_SIZE", "20");
    std::env::set_var("MONGO_SSL", "true");

    let config = Config::from_env().unwrap();
    assert_eq!(config.url, "mongodb://db.internal:27017");
    assert_eq!(config.migrations_collection, "app_migrations");
    assert_eq!(config.max_pool_size, Some(20));
    assert!(config.ssl_enabled);
    assert_eq!(config.lock_collection(), "app_migrations_lock");
}

#[test]
#[serial]
fn invalid_pool_size_rejected() {
    clear_env();
    std::env::set_var("MONGO_DATABASE", "app");
    std::env::set_var("MONGO_MAX_POOL_SIZE", "lots");

    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::InvalidValue { var: "MONGO_MAX_POOL_SIZE", .. })
    ));
}
