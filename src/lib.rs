// src/lib.rs

//! Parcel Tracker
//!
//! Minimal persistence layer for shipment records kept in SQLite.
//!
//! # Architecture
//!
//! - [`db`]: opening and initializing the database file (the caller owns the handle)
//! - [`store::ParcelStore`]: one parameterized statement per operation over a borrowed handle
//! - Registered gate: address changes and deletes only apply while a parcel is `registered`

pub mod db;
mod error;
pub mod store;

pub use db::models::Parcel;
pub use error::{Error, Result};
pub use store::ParcelStore;
