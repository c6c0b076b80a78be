// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other persistence test starts from `Persistence::new_in_memory()`,
//! so connection setup, migrations and foreign key enforcement are also
//! exercised implicitly. The tests here cover isolation between handles and
//! durability of a file-backed store across reopen.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use cleaning_bot_domain::{Role, Schedule};

use super::{create_test_entry, create_test_user};
use crate::Persistence;
use crate::error::PersistenceError;

static FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_db_path() -> PathBuf {
    let id: u64 = FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "cleaning_bot_test_{}_{id}.db",
        std::process::id()
    ))
}

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    db1.create_user(&create_test_user(1, Role::Admin)).unwrap();
    db1.add_free_inspector("I1").unwrap();

    assert!(db1.user_exists(1).unwrap());
    assert!(!db2.user_exists(1).unwrap(), "db2 should not see db1's user");
    assert!(db2.list_free_inspectors().unwrap().is_empty());
}

#[test]
fn test_open_without_url_uses_memory() {
    let mut persistence = Persistence::open(None).unwrap();
    assert!(persistence.get_schedule().is_ok());
}

#[test]
fn test_file_store_survives_reopen() {
    let path: PathBuf = temp_db_path();

    {
        let mut persistence = Persistence::new_with_file(&path).unwrap();
        persistence
            .add_active_inspection(&create_test_entry("K1", Some("I1")))
            .unwrap();
        persistence.add_free_inspector("I2").unwrap();
    }

    let mut reopened = Persistence::open(path.to_str()).unwrap();
    let schedule: Schedule = reopened.get_schedule().unwrap();

    assert_eq!(schedule.active_inspectors.len(), 1);
    assert_eq!(schedule.active_inspectors[0].checklist_id, "K1");
    assert_eq!(schedule.free_inspectors, vec!["I2"]);

    drop(reopened);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}
