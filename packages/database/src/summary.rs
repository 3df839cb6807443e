//! Per-nature incident counts.

use std::io::Write;
use std::path::Path;

use normanpd_incident_models::CategoryCount;

use crate::{DbError, open};

/// Counts stored incidents grouped by nature, ordered ascending by nature.
///
/// # Errors
///
/// Returns [`DbError`] if the database cannot be opened or the
/// `incidents` table does not exist.
pub fn category_counts(path: &Path) -> Result<Vec<CategoryCount>, DbError> {
    let conn = open(path)?;
    let mut stmt =
        conn.prepare("SELECT nature, COUNT(*) FROM incidents GROUP BY nature ORDER BY nature")?;

    let counts = stmt
        .query_map([], |row| {
            let count: i64 = row.get(1)?;
            Ok(CategoryCount {
                category: row.get(0)?,
                count: u64::try_from(count).unwrap_or(0),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Summarized {} distinct natures", counts.len());

    Ok(counts)
}

/// Writes one `nature|count` line per entry.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_report(counts: &[CategoryCount], mut out: impl Write) -> std::io::Result<()> {
    for count in counts {
        writeln!(out, "{count}")?;
    }
    out.flush()
}
