// src/error.rs

use thiserror::Error;

/// Core error types for the parcel tracker
#[derive(Error, Debug)]
pub enum Error {
    /// Database-related errors outside of parcel operations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Database initialization error
    #[error("Failed to initialize database: {0}")]
    InitError(String),

    /// Database not found
    #[error("Database not found at path: {0}")]
    DatabaseNotFound(String),

    /// The insert statement was rejected by the engine
    #[error("Failed to add parcel: {source}")]
    Insert {
        #[source]
        source: rusqlite::Error,
    },

    /// The insert succeeded but the assigned number could not be read back
    #[error("Failed to retrieve the number of the added parcel: {reason}")]
    IdentityRetrieval { reason: String },

    /// A single-row fetch failed; see [`Error::is_not_found`]
    #[error("Parcel {number} not found")]
    NotFound {
        number: i64,
        #[source]
        source: rusqlite::Error,
    },

    /// The multi-row fetch could not be executed
    #[error("Failed to query parcels of client {client}: {source}")]
    Query {
        client: i64,
        #[source]
        source: rusqlite::Error,
    },

    /// A row of the multi-row fetch could not be decoded
    #[error("Failed to decode a parcel of client {client}: {source}")]
    Scan {
        client: i64,
        #[source]
        source: rusqlite::Error,
    },

    /// The result cursor failed while stepping through rows
    #[error("Failed to read parcel rows of client {client}: {source}")]
    Rows {
        client: i64,
        #[source]
        source: rusqlite::Error,
    },

    /// An update statement failed
    #[error("Failed to update parcel {number}: {source}")]
    Update {
        number: i64,
        #[source]
        source: rusqlite::Error,
    },

    /// A delete statement failed
    #[error("Failed to delete parcel {number}: {source}")]
    Delete {
        number: i64,
        #[source]
        source: rusqlite::Error,
    },
}

impl Error {
    /// True when a single-row fetch matched no row at all
    ///
    /// Read failures and missing rows share the same message, so callers
    /// that need "does not exist" logic should check this instead.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NotFound {
                source: rusqlite::Error::QueryReturnedNoRows,
                ..
            }
        )
    }
}

/// Result type alias using the tracker's Error type
pub type Result<T> = std::result::Result<T, Error>;
