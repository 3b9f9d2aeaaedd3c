// src/db/models.rs

//! Data models for parcel records
//!
//! This module defines the Rust struct that corresponds to the `parcel`
//! table and how a row is decoded into it. Statements live in
//! [`crate::store`].

use chrono::{SecondsFormat, Utc};
use rusqlite::Row;
use serde::Serialize;

/// Initial status of every parcel; the only status that allows address
/// changes and deletion
pub const STATUS_REGISTERED: &str = "registered";

/// Conventional status for a parcel handed to the carrier
pub const STATUS_SENT: &str = "sent";

/// Conventional status for a parcel handed to the recipient
pub const STATUS_DELIVERED: &str = "delivered";

/// A Parcel is a tracked shipment
///
/// `status` is an open set of labels; only [`STATUS_REGISTERED`] has a
/// meaning to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parcel {
    /// Assigned by the database on insert, 0 until then
    pub number: i64,
    pub client: i64,
    pub status: String,
    pub address: String,
    /// RFC3339 timestamp chosen by the caller
    pub created_at: String,
}

impl Parcel {
    /// Create a new registered Parcel with an unassigned number
    pub fn new(client: i64, address: String, created_at: String) -> Self {
        Self {
            number: 0,
            client,
            status: STATUS_REGISTERED.to_string(),
            address,
            created_at,
        }
    }

    /// Create a new registered Parcel stamped with the current UTC time
    pub fn registered_now(client: i64, address: String) -> Self {
        Self::new(client, address, now_rfc3339())
    }

    pub fn is_registered(&self) -> bool {
        self.status == STATUS_REGISTERED
    }

    /// Convert a database row to a Parcel
    ///
    /// Expects the columns in table order: number, client, status,
    /// address, created_at.
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            number: row.get(0)?,
            client: row.get(1)?,
            status: row.get(2)?,
            address: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

/// Current UTC time as RFC3339 with second precision, e.g. `2024-01-01T00:00:00Z`
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
