#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Ingests one Norman PD daily incident summary and reports incident
//! counts by nature.
//!
//! The run is strictly sequential: download, render pages, extract rows,
//! replace the `incidents` table, then summarize. Any failure before the
//! summary aborts the run.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use normanpd_database::{DbError, incidents_db, paths, summary};
use normanpd_incident_models::CategoryCount;
use normanpd_pdf::{PdfError, download, layout, rows};

/// Environment variable that overrides the database path.
pub const DB_PATH_ENV: &str = "NORMANPD_DB_PATH";

/// Errors that abort an ingestion run.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Download or PDF parsing failed.
    #[error(transparent)]
    Pdf(#[from] PdfError),

    /// Storing or summarizing failed.
    #[error("Store error: {0}")]
    Db(#[from] DbError),

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings for a single ingestion run.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// URL of the daily incident summary PDF.
    pub incidents_url: String,
    /// `DuckDB` file the incidents are written to.
    pub db_path: PathBuf,
}

impl IngestConfig {
    /// Creates a config for `incidents_url` using the default database
    /// path.
    #[must_use]
    pub fn new(incidents_url: &str) -> Self {
        Self {
            incidents_url: incidents_url.to_owned(),
            db_path: paths::incidents_db_path(),
        }
    }

    /// Sets the database path.
    #[must_use]
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    /// Creates a config for `incidents_url`, honoring [`DB_PATH_ENV`]
    /// when it is set to a non-empty value.
    #[must_use]
    pub fn from_env(incidents_url: &str) -> Self {
        let config = Self::new(incidents_url);
        match std::env::var(DB_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => config.with_db_path(path),
            _ => config,
        }
    }
}

/// Runs the full pipeline and returns the per-nature counts.
///
/// # Errors
///
/// Returns [`IngestError`] if the download, PDF parsing, or any database
/// step fails.
pub async fn run(config: &IngestConfig) -> Result<Vec<CategoryCount>, IngestError> {
    let start = Instant::now();

    let bytes = download::fetch_incidents(&config.incidents_url).await?;
    let pages = layout::extract_pages(&bytes)?;
    log::info!("Rendered {} page(s)", pages.len());

    let counts = ingest_pages(&pages, &config.db_path)?;

    log::info!(
        "Ingestion complete in {:.1}s",
        start.elapsed().as_secs_f64()
    );

    Ok(counts)
}

/// Extracts records from rendered `pages`, replaces the stored incidents
/// at `db_path` with them, and returns the per-nature counts.
///
/// # Errors
///
/// Returns [`IngestError::Db`] if any database step fails.
pub fn ingest_pages<S: AsRef<str>>(
    pages: &[S],
    db_path: &Path,
) -> Result<Vec<CategoryCount>, IngestError> {
    let (records, stats) = rows::extract_with_stats(pages);
    log::info!(
        "Extracted {} incidents from {} page(s) ({} header rows, {} lines dropped)",
        records.len(),
        stats.pages,
        stats.header_rows,
        stats.dropped_lines()
    );

    incidents_db::reset(db_path)?;
    let inserted = incidents_db::insert_all(db_path, &records)?;
    log::info!("Stored {inserted} incidents in {}", db_path.display());

    Ok(summary::category_counts(db_path)?)
}

/// Writes the `nature|count` report for `counts` to `out`.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if writing to `out` fails.
pub fn report(counts: &[CategoryCount], out: impl Write) -> Result<(), IngestError> {
    summary::write_report(counts, out)?;
    Ok(())
}
