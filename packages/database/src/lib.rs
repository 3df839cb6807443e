#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! `DuckDB` storage for the daily incident summary.
//!
//! The database holds a single `incidents` table that is dropped and
//! recreated on every run. [`incidents_db`] owns the schema and writes;
//! [`summary`] runs the per-nature count report.
//!
//! Every function takes the database path and opens its own connection,
//! so no transaction or handle outlives a single call.

pub mod incidents_db;
pub mod paths;
pub mod summary;

use std::path::Path;

use duckdb::Connection;

/// Errors that can occur during database operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// `DuckDB` error (missing table, unwritable file, bad SQL).
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    /// Creating the storage directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Opens (or creates) the database file at `path`.
fn open(path: &Path) -> Result<Connection, DbError> {
    log::trace!("Opening {}", path.display());
    Ok(Connection::open(path)?)
}
