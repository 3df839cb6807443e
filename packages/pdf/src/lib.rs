#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Daily incident summary PDF handling.
//!
//! The department publishes one PDF per day with a single table of
//! incidents. This crate covers everything between the URL and the
//! in-memory record list:
//!
//! - [`download`] fetches the raw PDF bytes
//! - [`layout`] renders each page to position-preserving text, where
//!   table columns are separated by runs of two or more spaces
//! - [`rows`] recovers [`IncidentRecord`]s from that text using the
//!   column-gap heuristic

pub mod download;
pub mod layout;
pub mod rows;

pub use normanpd_incident_models::IncidentRecord;

/// Errors raised while fetching or opening an incident summary.
///
/// Malformed table rows are never an error; [`rows`] drops them.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// The HTTP request failed or returned a non-success status.
    #[error("PDF retrieval failed: {0}")]
    Retrieval(#[from] reqwest::Error),

    /// The downloaded bytes could not be parsed as a paged PDF document.
    #[error("PDF document error: {0}")]
    Document(String),
}
