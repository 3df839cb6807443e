//! PDF download.
//!
//! A single GET per run. Redirects are whatever [`reqwest`] follows by
//! default; there is no retry.

use crate::PdfError;

/// Downloads the document at `url` and returns its raw bytes.
///
/// # Errors
///
/// Returns [`PdfError::Retrieval`] on any transport failure (DNS,
/// connect, timeout, reset) or non-success HTTP status.
pub async fn fetch_incidents(url: &str) -> Result<Vec<u8>, PdfError> {
    log::info!("Downloading incident summary from {url}");

    let response = reqwest::get(url).await?.error_for_status()?;
    let bytes = response.bytes().await?;

    log::debug!("Downloaded {} bytes from {url}", bytes.len());

    Ok(bytes.to_vec())
}
