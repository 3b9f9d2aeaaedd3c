// tests/integration_test.rs

//! Integration tests for the parcel tracker
//!
//! These tests run the store against an initialized database file.

use parcel_tracker::db;
use parcel_tracker::db::models::{Parcel, STATUS_DELIVERED, STATUS_REGISTERED, STATUS_SENT};
use parcel_tracker::{Error, ParcelStore};
use rusqlite::Connection;
use std::collections::HashMap;
use tempfile::TempDir;

/// Initialize a fresh database in a temp dir and open it
fn setup_db() -> (TempDir, Connection) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("tracker.db");
    let db_path = db_path.to_str().unwrap();

    db::init(db_path).unwrap();
    let conn = db::open(db_path).unwrap();
    (temp_dir, conn)
}

fn test_parcel() -> Parcel {
    Parcel::registered_now(1000, "test".to_string())
}

#[test]
fn test_example_scenario() {
    let (_dir, conn) = setup_db();
    let store = ParcelStore::new(&conn);

    let mut parcel = Parcel::new(
        1000,
        "test".to_string(),
        "2024-01-01T00:00:00Z".to_string(),
    );
    let number = store.add(&parcel).unwrap();
    parcel.number = number;

    assert_eq!(store.get(number).unwrap(), parcel);

    store.set_address(number, "new address").unwrap();
    assert_eq!(store.get(number).unwrap().address, "new address");

    store.delete(number).unwrap();
    let err = store.get(number).unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, Error::NotFound { number: n, .. } if n == number));
}

#[test]
fn test_add_get_delete() {
    let (_dir, conn) = setup_db();
    let store = ParcelStore::new(&conn);
    let mut parcel = test_parcel();

    let number = store.add(&parcel).unwrap();
    assert!(number > 0);
    parcel.number = number;

    let got = store.get(number).unwrap();
    assert_eq!(got, parcel);

    store.delete(number).unwrap();
    assert!(store.get(number).unwrap_err().is_not_found());
}

#[test]
fn test_numbers_are_distinct() {
    let (_dir, conn) = setup_db();
    let store = ParcelStore::new(&conn);

    let first = store.add(&test_parcel()).unwrap();
    let second = store.add(&test_parcel()).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_delete_only_when_registered() {
    let (_dir, conn) = setup_db();
    let store = ParcelStore::new(&conn);
    let number = store.add(&test_parcel()).unwrap();

    store.set_status(number, STATUS_SENT).unwrap();
    store.delete(number).unwrap();

    let got = store.get(number).unwrap();
    assert_eq!(got.number, number);
    assert_eq!(got.status, STATUS_SENT);
}

#[test]
fn test_set_address() {
    let (_dir, conn) = setup_db();
    let store = ParcelStore::new(&conn);
    let number = store.add(&test_parcel()).unwrap();

    let new_address = "new test address";
    store.set_address(number, new_address).unwrap();

    assert_eq!(store.get(number).unwrap().address, new_address);
}

#[test]
fn test_set_address_blocked_once_sent() {
    let (_dir, conn) = setup_db();
    let store = ParcelStore::new(&conn);
    let number = store.add(&test_parcel()).unwrap();

    store.set_status(number, STATUS_SENT).unwrap();
    store.set_address(number, "too late").unwrap();

    assert_eq!(store.get(number).unwrap().address, "test");
}

#[test]
fn test_set_address_allowed_again_after_status_reset() {
    // Status has no transition rules, so a parcel can go back to registered
    let (_dir, conn) = setup_db();
    let store = ParcelStore::new(&conn);
    let number = store.add(&test_parcel()).unwrap();

    store.set_status(number, STATUS_DELIVERED).unwrap();
    store.set_status(number, STATUS_REGISTERED).unwrap();
    store.set_address(number, "corrected").unwrap();

    assert_eq!(store.get(number).unwrap().address, "corrected");
}

#[test]
fn test_set_status() {
    let (_dir, conn) = setup_db();
    let store = ParcelStore::new(&conn);
    let number = store.add(&test_parcel()).unwrap();

    for status in [STATUS_SENT, STATUS_DELIVERED, "returned", STATUS_SENT] {
        store.set_status(number, status).unwrap();
        assert_eq!(store.get(number).unwrap().status, status);
    }
}

#[test]
fn test_get_by_client() {
    let (_dir, conn) = setup_db();
    let store = ParcelStore::new(&conn);

    let client = 4_242_424;
    let mut expected: HashMap<i64, Parcel> = HashMap::new();
    for address in ["first", "second", "third"] {
        let mut parcel = Parcel::registered_now(client, address.to_string());
        parcel.number = store.add(&parcel).unwrap();
        expected.insert(parcel.number, parcel);
    }

    // Noise from another client
    let mut other = test_parcel();
    other.client = client + 1;
    store.add(&other).unwrap();

    let stored = store.get_by_client(client).unwrap();
    assert_eq!(stored.len(), expected.len());

    for parcel in &stored {
        let want = expected
            .get(&parcel.number)
            .unwrap_or_else(|| panic!("parcel {} not expected", parcel.number));
        assert_eq!(parcel, want);
    }
}

#[test]
fn test_get_by_client_empty() {
    let (_dir, conn) = setup_db();
    let store = ParcelStore::new(&conn);
    store.add(&test_parcel()).unwrap();

    let parcels = store.get_by_client(31337).unwrap();
    assert!(parcels.is_empty());
}

#[test]
fn test_missing_parcel_mutations_are_silent() {
    // Not-found and "no longer registered" both affect zero rows and
    // both report success
    let (_dir, conn) = setup_db();
    let store = ParcelStore::new(&conn);

    assert!(store.set_status(1_000_000, STATUS_SENT).is_ok());
    assert!(store.set_address(1_000_000, "nowhere").is_ok());
    assert!(store.delete(1_000_000).is_ok());
    assert!(store.get(1_000_000).unwrap_err().is_not_found());
}

#[test]
fn test_data_survives_reopen() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("nested/tracker.db");
    let db_path = db_path.to_str().unwrap();

    db::init(db_path).unwrap();
    let number = {
        let conn = db::open(db_path).unwrap();
        ParcelStore::new(&conn).add(&test_parcel()).unwrap()
    };

    let conn = db::open(db_path).unwrap();
    assert_eq!(ParcelStore::new(&conn).get(number).unwrap().number, number);
}

#[test]
fn test_store_shared_through_mutex() {
    use std::sync::{Arc, Mutex};
    use std::thread;

    let (_dir, conn) = setup_db();
    let conn = Arc::new(Mutex::new(conn));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let conn = Arc::clone(&conn);
            thread::spawn(move || {
                let conn = conn.lock().unwrap();
                ParcelStore::new(&conn)
                    .add(&Parcel::registered_now(77, format!("addr {}", i)))
                    .unwrap()
            })
        })
        .collect();

    let mut numbers: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    numbers.sort();
    numbers.dedup();
    assert_eq!(numbers.len(), 4);

    let conn = conn.lock().unwrap();
    assert_eq!(ParcelStore::new(&conn).get_by_client(77).unwrap().len(), 4);
}
