//! The `incidents` table.
//!
//! Five untyped text columns in record field order, no constraints and no
//! key. Each run replaces the table wholesale with [`reset`] followed by
//! [`insert_all`].

use std::path::Path;

use normanpd_incident_models::{FIELD_COUNT, IncidentRecord};

use crate::{DbError, open};

/// Number of rows per INSERT statement.
const CHUNK_SIZE: usize = 1_000;

/// Drops and recreates the `incidents` table in the database at `path`,
/// creating the parent directory and the database file if needed.
///
/// # Errors
///
/// Returns [`DbError`] if the directory, file, or table cannot be
/// created.
pub fn reset(path: &Path) -> Result<(), DbError> {
    if let Some(parent) = path.parent() {
        crate::paths::ensure_dir(parent)?;
    }

    let conn = open(path)?;
    conn.execute_batch(
        "DROP TABLE IF EXISTS incidents;
         CREATE TABLE incidents (
            incident_time TEXT,
            incident_number TEXT,
            incident_location TEXT,
            nature TEXT,
            incident_ori TEXT
         );",
    )?;

    log::debug!("Recreated incidents table in {}", path.display());

    Ok(())
}

/// Inserts `records` in the order given, inside a single transaction.
///
/// Returns the number of rows inserted.
///
/// # Errors
///
/// Returns [`DbError`] if the database cannot be opened or the
/// `incidents` table does not exist.
pub fn insert_all(path: &Path, records: &[IncidentRecord]) -> Result<u64, DbError> {
    let mut conn = open(path)?;

    if records.is_empty() {
        // Still surface a missing table.
        conn.execute_batch("SELECT * FROM incidents LIMIT 0")?;
        return Ok(0);
    }

    let tx = conn.transaction()?;
    let mut total_inserted = 0u64;

    for chunk in records.chunks(CHUNK_SIZE) {
        let mut sql = String::from(
            "INSERT INTO incidents (
                incident_time, incident_number, incident_location, nature, incident_ori
            ) VALUES ",
        );

        for i in 0..chunk.len() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str("(?, ?, ?, ?, ?)");
        }

        let mut stmt = tx.prepare(&sql)?;
        let mut param_idx = 1usize;

        for record in chunk {
            for (offset, value) in record.fields().into_iter().enumerate() {
                stmt.raw_bind_parameter(param_idx + offset, value)?;
            }
            param_idx += FIELD_COUNT;
        }

        let rows = stmt.raw_execute()?;
        total_inserted += u64::try_from(rows).unwrap_or(0);
    }

    tx.commit()?;

    log::debug!(
        "Inserted {total_inserted} incidents into {}",
        path.display()
    );

    Ok(total_inserted)
}

/// Reads every stored incident back in insertion order.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails.
pub fn load_all(path: &Path) -> Result<Vec<IncidentRecord>, DbError> {
    let conn = open(path)?;
    let mut stmt = conn.prepare(
        "SELECT incident_time, incident_number, incident_location, nature, incident_ori
         FROM incidents
         ORDER BY rowid",
    )?;

    let records = stmt
        .query_map([], |row| {
            Ok(IncidentRecord {
                occurred_at: row.get(0)?,
                case_number: row.get(1)?,
                location: row.get(2)?,
                category: row.get(3)?,
                agency_code: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

/// Returns the number of stored incidents.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails.
pub fn count(path: &Path) -> Result<u64, DbError> {
    let conn = open(path)?;
    let mut stmt = conn.prepare("SELECT COUNT(*) FROM incidents")?;
    let count: i64 = stmt.query_row([], |row| row.get(0))?;
    Ok(u64::try_from(count).unwrap_or(0))
}
