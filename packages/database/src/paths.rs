#![allow(clippy::module_name_repetitions)]
//! Canonical file paths for the incident database.
//!
//! Paths are relative to the current working directory.

use std::path::{Path, PathBuf};

/// Returns the `resources/` directory path.
#[must_use]
pub fn resources_dir() -> PathBuf {
    PathBuf::from("resources")
}

/// Returns the default path of the incident `DuckDB` file.
#[must_use]
pub fn incidents_db_path() -> PathBuf {
    resources_dir().join("normanpd.duckdb")
}

/// Ensures a directory exists, creating it if necessary.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
