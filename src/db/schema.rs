// src/db/schema.rs

//! Table definition for parcels
//!
//! There is a single table and no versioned migrations; creation uses
//! `IF NOT EXISTS` so it can run on every [`super::init`].

use crate::error::Result;
use rusqlite::Connection;
use tracing::debug;

/// Create the `parcel` table and its client index if they are missing
///
/// `number` is an AUTOINCREMENT rowid, so numbers of deleted parcels are
/// never handed out again.
pub fn create(conn: &Connection) -> Result<()> {
    debug!("Ensuring parcel schema exists");

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS parcel (
            number INTEGER PRIMARY KEY AUTOINCREMENT,
            client INTEGER NOT NULL,
            status TEXT NOT NULL,
            address TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_parcel_client ON parcel(client);
        ",
    )?;

    Ok(())
}
