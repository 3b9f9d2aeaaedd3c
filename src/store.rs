// src/store.rs

//! Parcel store
//!
//! Every operation is exactly one parameterized statement against the
//! `parcel` table, so each is atomic as seen by SQLite. Address changes
//! and deletes fold the "still registered" check into the statement's
//! WHERE clause instead of reading the status first.
//!
//! Updates and deletes that match no row are not errors: a missing
//! parcel and a parcel that is no longer registered look the same to
//! the caller. The affected-row count is logged at debug level.

use crate::db::models::{Parcel, STATUS_REGISTERED};
use crate::error::{Error, Result};
use rusqlite::{Connection, params};
use tracing::debug;

const INSERT_PARCEL: &str =
    "INSERT INTO parcel (client, status, address, created_at) VALUES (?1, ?2, ?3, ?4)";

const SELECT_BY_NUMBER: &str =
    "SELECT number, client, status, address, created_at FROM parcel WHERE number = ?1";

const SELECT_BY_CLIENT: &str =
    "SELECT number, client, status, address, created_at FROM parcel WHERE client = ?1";

const UPDATE_STATUS: &str = "UPDATE parcel SET status = ?1 WHERE number = ?2";

const UPDATE_ADDRESS: &str = "UPDATE parcel SET address = ?1 WHERE number = ?2 AND status = ?3";

const DELETE_REGISTERED: &str = "DELETE FROM parcel WHERE number = ?1 AND status = ?2";

/// Data-access facade over a borrowed SQLite connection
///
/// The store holds no state besides the handle and never opens or closes
/// it. Share it across threads the way the connection itself is shared
/// (e.g. one store per locked connection).
#[derive(Debug, Clone, Copy)]
pub struct ParcelStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ParcelStore<'conn> {
    /// Create a store over a ready-to-use connection
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Insert a parcel and return the number the database assigned
    ///
    /// `parcel.number` is ignored; status and timestamp are stored as given.
    pub fn add(&self, parcel: &Parcel) -> Result<i64> {
        let inserted = self
            .conn
            .execute(
                INSERT_PARCEL,
                params![
                    parcel.client,
                    &parcel.status,
                    &parcel.address,
                    &parcel.created_at,
                ],
            )
            .map_err(|source| Error::Insert { source })?;

        if inserted != 1 {
            return Err(Error::IdentityRetrieval {
                reason: format!("insert affected {} rows", inserted),
            });
        }

        let number = self.conn.last_insert_rowid();
        if number <= 0 {
            return Err(Error::IdentityRetrieval {
                reason: format!("database reported rowid {}", number),
            });
        }

        debug!("Added parcel {} for client {}", number, parcel.client);
        Ok(number)
    }

    /// Fetch a single parcel by number
    ///
    /// Any failure is reported as [`Error::NotFound`]; use
    /// [`Error::is_not_found`] to tell a missing row from a failed read.
    pub fn get(&self, number: i64) -> Result<Parcel> {
        self.conn
            .query_row(SELECT_BY_NUMBER, [number], Parcel::from_row)
            .map_err(|source| Error::NotFound { number, source })
    }

    /// Fetch every parcel of a client, in whatever order SQLite yields them
    ///
    /// Returns an empty list when the client has no parcels.
    pub fn get_by_client(&self, client: i64) -> Result<Vec<Parcel>> {
        let mut stmt = self
            .conn
            .prepare(SELECT_BY_CLIENT)
            .map_err(|source| Error::Query { client, source })?;
        let mut rows = stmt
            .query([client])
            .map_err(|source| Error::Query { client, source })?;

        // SQLite executes on the first step, so a failure there is a query
        // failure; later step failures are cursor failures. Dropping `rows`
        // resets the statement on every return path.
        let mut parcels = Vec::new();
        let mut stepped = false;
        loop {
            let row = match rows.next() {
                Ok(Some(row)) => row,
                Ok(None) => break,
                Err(source) if !stepped => return Err(Error::Query { client, source }),
                Err(source) => return Err(Error::Rows { client, source }),
            };
            stepped = true;

            let parcel =
                Parcel::from_row(row).map_err(|source| Error::Scan { client, source })?;
            parcels.push(parcel);
        }

        debug!("Fetched {} parcels for client {}", parcels.len(), client);
        Ok(parcels)
    }

    /// Overwrite the status of a parcel, whatever its current status
    pub fn set_status(&self, number: i64, status: &str) -> Result<()> {
        let updated = self
            .conn
            .execute(UPDATE_STATUS, params![status, number])
            .map_err(|source| Error::Update { number, source })?;

        debug!("Set status of parcel {} to {:?} ({} rows affected)", number, status, updated);
        Ok(())
    }

    /// Overwrite the address of a parcel that is still registered
    pub fn set_address(&self, number: i64, address: &str) -> Result<()> {
        let updated = self
            .conn
            .execute(UPDATE_ADDRESS, params![address, number, STATUS_REGISTERED])
            .map_err(|source| Error::Update { number, source })?;

        debug!("Set address of parcel {} ({} rows affected)", number, updated);
        Ok(())
    }

    /// Delete a parcel that is still registered
    pub fn delete(&self, number: i64) -> Result<()> {
        let deleted = self
            .conn
            .execute(DELETE_REGISTERED, params![number, STATUS_REGISTERED])
            .map_err(|source| Error::Delete { number, source })?;

        debug!("Deleted parcel {} ({} rows affected)", number, deleted);
        Ok(())
    }
}
