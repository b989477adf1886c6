// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use docket_app::{
    ClientStorage, PLACEHOLDER_PROFILE_IMAGE, PROFILE_IMAGE_KEY, SessionHints, load_profile_image,
    store_profile_image,
};
use docket_db::{Store, validate_db_path};
use docket_testkit::temp_db_path;

#[test]
fn validate_db_path_rejects_uri_forms() {
    assert!(validate_db_path("file:test.db").is_err());
    assert!(validate_db_path("https://example.com/db.sqlite").is_err());
    assert!(validate_db_path("db.sqlite?mode=ro").is_err());
    assert!(validate_db_path("").is_err());
    assert!(validate_db_path("/tmp/docket.db").is_ok());
    assert!(validate_db_path(":memory:").is_ok());
}

#[test]
fn bootstrap_is_repeatable() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.bootstrap()?;
    assert!(store.keys()?.is_empty());
    Ok(())
}

#[test]
fn bootstrap_rejects_foreign_database() -> Result<()> {
    let store = Store::open_memory()?;
    store
        .raw_connection()
        .execute_batch("CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT);")?;

    let err = store
        .bootstrap()
        .expect_err("schema validation should fail");
    assert!(err.to_string().contains("missing required table `client_state`"));
    Ok(())
}

#[test]
fn bootstrap_rejects_missing_columns() -> Result<()> {
    let store = Store::open_memory()?;
    store
        .raw_connection()
        .execute_batch("CREATE TABLE client_state (key TEXT PRIMARY KEY, value TEXT);")?;

    let err = store
        .bootstrap()
        .expect_err("schema validation should fail");
    assert!(err.to_string().contains("updated_at"));
    Ok(())
}

#[test]
fn put_overwrites_existing_value() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    store.put_value("email", "first@example.com")?;
    store.put_value("email", "second@example.com")?;

    assert_eq!(
        store.get_value("email")?.as_deref(),
        Some("second@example.com")
    );
    assert_eq!(store.keys()?, vec!["email".to_owned()]);
    assert!(store.delete_value("email")?);
    assert!(!store.delete_value("email")?);
    Ok(())
}

#[test]
fn profile_image_persists_across_reopen() -> Result<()> {
    let (_dir, path) = temp_db_path()?;
    {
        let mut store = Store::open(&path)?;
        store.bootstrap()?;
        assert_eq!(load_profile_image(&store)?, PLACEHOLDER_PROFILE_IMAGE);
        store_profile_image(&mut store, "data:image/png;base64,iVBOR")?;
    }

    let store = Store::open(&path)?;
    store.bootstrap()?;
    assert_eq!(
        store.get(PROFILE_IMAGE_KEY)?.as_deref(),
        Some("data:image/png;base64,iVBOR")
    );
    Ok(())
}

#[test]
fn session_hints_use_the_same_table() -> Result<()> {
    let mut store = Store::open_memory()?;
    store.bootstrap()?;

    let hints = SessionHints {
        role: Some("CourtRegistrar".to_owned()),
        email: Some("registrar@example.com".to_owned()),
    };
    hints.save(&mut store)?;

    assert_eq!(SessionHints::load(&store)?, hints);
    assert_eq!(store.keys()?, vec!["email".to_owned(), "userRole".to_owned()]);
    Ok(())
}
