//! Row recovery from layout text.
//!
//! The summary table has no ruling or delimiters in its text form, only
//! whitespace. A physical line becomes a record when splitting it on runs
//! of two or more spaces yields at least five tokens. The first such line
//! on every page is the repeated column header and is dropped by position,
//! not by matching its wording.
//!
//! Nothing here fails. Lines that do not split into enough columns
//! (titles, footers, wrapped location fragments) are skipped and the
//! report comes out slightly undercounted instead.
//!
//! A location containing its own run of two spaces shifts the nature and
//! ORI columns one position to the right. That output is kept as-is;
//! changing it would change the counts produced for existing documents.

use std::sync::LazyLock;

use normanpd_incident_models::{FIELD_COUNT, IncidentRecord};
use regex::Regex;

/// Column gap: two or more consecutive spaces.
static COLUMN_GAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("valid regex"));

/// Line counters accumulated over one extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub pages: usize,
    pub lines: usize,
    /// Lines with at least [`FIELD_COUNT`] tokens, headers included.
    pub candidate_rows: usize,
    pub header_rows: usize,
    pub records: usize,
}

impl ExtractionStats {
    /// Lines dropped for having too few columns.
    #[must_use]
    pub const fn dropped_lines(&self) -> usize {
        self.lines - self.candidate_rows
    }

    const fn add(&mut self, other: Self) {
        self.pages += other.pages;
        self.lines += other.lines;
        self.candidate_rows += other.candidate_rows;
        self.header_rows += other.header_rows;
        self.records += other.records;
    }
}

/// Splits a line into trimmed, non-empty column tokens.
#[must_use]
pub fn split_fields(line: &str) -> Vec<&str> {
    COLUMN_GAP_RE
        .split(line)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Header state for a single page.
///
/// A fresh value is created for every page so that each page's first
/// candidate row is treated as its header.
#[derive(Debug, Default)]
struct PageRows {
    header_consumed: bool,
    stats: ExtractionStats,
}

impl PageRows {
    fn accept(&mut self, line: &str) -> Option<IncidentRecord> {
        self.stats.lines += 1;

        let fields = split_fields(line);
        if fields.len() < FIELD_COUNT {
            return None;
        }
        self.stats.candidate_rows += 1;

        if !self.header_consumed {
            self.header_consumed = true;
            self.stats.header_rows += 1;
            log::trace!("Skipping header row: {fields:?}");
            return None;
        }

        let record = IncidentRecord::from_fields(&fields)?;
        self.stats.records += 1;
        Some(record)
    }
}

fn extract_page_with_stats(text: &str) -> (Vec<IncidentRecord>, ExtractionStats) {
    let mut page = PageRows::default();
    let records: Vec<IncidentRecord> = text.lines().filter_map(|line| page.accept(line)).collect();
    page.stats.pages = 1;

    log::trace!(
        "Page yielded {} records ({} short lines dropped)",
        records.len(),
        page.stats.dropped_lines()
    );

    (records, page.stats)
}

/// Extracts the incident records from a single page of layout text.
#[must_use]
pub fn extract_page(text: &str) -> Vec<IncidentRecord> {
    extract_page_with_stats(text).0
}

/// Extracts incident records from every page, concatenated in page order,
/// along with line counters for the whole run.
#[must_use]
pub fn extract_with_stats<S: AsRef<str>>(pages: &[S]) -> (Vec<IncidentRecord>, ExtractionStats) {
    let mut records = Vec::new();
    let mut stats = ExtractionStats::default();

    for page in pages {
        let (page_records, page_stats) = extract_page_with_stats(page.as_ref());
        records.extend(page_records);
        stats.add(page_stats);
    }

    log::debug!("{stats:?}");

    (records, stats)
}

/// Extracts incident records from every page, concatenated in page order.
#[must_use]
pub fn extract<S: AsRef<str>>(pages: &[S]) -> Vec<IncidentRecord> {
    extract_with_stats(pages).0
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Date / Time  Incident Number  Location  Nature  Incident ORI";

    fn record(fields: [&str; 5]) -> IncidentRecord {
        IncidentRecord::from_fields(&fields).unwrap()
    }

    #[test]
    fn splits_on_runs_of_two_or_more_spaces() {
        assert_eq!(
            split_fields("8/1/2024 10:00   2024-00012345  123 Main St"),
            vec!["8/1/2024 10:00", "2024-00012345", "123 Main St"]
        );
    }

    #[test]
    fn single_spaces_and_tabs_are_not_gaps() {
        assert_eq!(split_fields("a b\tc  d"), vec!["a b\tc", "d"]);
    }

    #[test]
    fn leading_indentation_does_not_produce_empty_tokens() {
        assert_eq!(split_fields("    a  b   "), vec!["a", "b"]);
        assert!(split_fields("      ").is_empty());
    }

    #[test]
    fn extracts_single_record_after_header() {
        let page = "Date / Time  Incident Number  Location  Nature  ORI\n8/1/2024 10:00  2024-00012345  123 Main St  Traffic Stop  OK0140200";

        assert_eq!(
            extract_page(page),
            vec![record([
                "8/1/2024 10:00",
                "2024-00012345",
                "123 Main St",
                "Traffic Stop",
                "OK0140200",
            ])]
        );
    }

    #[test]
    fn drops_lines_with_fewer_than_five_tokens() {
        let page = format!(
            "{HEADER}\n8/1/2024 10:00  2024-00012345  123 Main St\n8/1/2024 10:05  2024-00012346  200 Oak Ave  Larceny  OK0140200"
        );

        let records = extract_page(&page);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].case_number, "2024-00012346");
    }

    #[test]
    fn short_lines_before_header_do_not_count_as_header() {
        let page = format!(
            "NORMAN POLICE DEPARTMENT\nDaily Incident Summary (Public)\n\n{HEADER}\n8/1/2024 0:04  2024-00055419  1935 W LINDSEY ST  Traffic Stop  OK0140200"
        );

        let records = extract_page(&page);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].location, "1935 W LINDSEY ST");
    }

    #[test]
    fn header_is_skipped_by_position_not_wording() {
        let page = "8/1/2024 0:04  2024-00055419  1935 W LINDSEY ST  Traffic Stop  OK0140200\n8/1/2024 0:09  2024-00055420  1204 ELM AVE  Alarm  OK0140200";

        let records = extract_page(page);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].case_number, "2024-00055420");
    }

    #[test]
    fn header_skip_yields_remaining_rows_in_order() {
        let page = format!(
            "{HEADER}\n\
             8/1/2024 0:04  2024-00055419  1935 W LINDSEY ST  Traffic Stop  OK0140200\n\
             8/1/2024 0:09  2024-00055420  1204 ELM AVE  Alarm  OK0140200\n\
             8/1/2024 0:12  2024-00011111  2000 ANN BRANDEN BLVD  Sick Person  EMSSTAT"
        );

        let records = extract_page(&page);

        let numbers: Vec<&str> = records.iter().map(|r| r.case_number.as_str()).collect();
        assert_eq!(
            numbers,
            vec!["2024-00055419", "2024-00055420", "2024-00011111"]
        );
    }

    #[test]
    fn extra_tokens_past_fifth_are_discarded() {
        let page = format!(
            "{HEADER}\n8/1/2024 1:00  2024-00000001  100 MAIN ST  Fraud  OK0140200  stray  fragment"
        );

        let records = extract_page(&page);

        assert_eq!(
            records,
            vec![record([
                "8/1/2024 1:00",
                "2024-00000001",
                "100 MAIN ST",
                "Fraud",
                "OK0140200",
            ])]
        );
    }

    #[test]
    fn location_with_internal_gap_shifts_columns() {
        let page = format!(
            "{HEADER}\n8/1/2024 1:00  2024-00000001  100 MAIN ST  APT 4  Fraud  OK0140200"
        );

        let records = extract_page(&page);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].location, "100 MAIN ST");
        assert_eq!(records[0].category, "APT 4");
        assert_eq!(records[0].agency_code, "Fraud");
    }

    #[test]
    fn unknown_categories_are_accepted() {
        let page = format!(
            "{HEADER}\n8/1/2024 1:00  2024-00000001  100 MAIN ST  Drone Sighting  14005"
        );

        let records = extract_page(&page);

        assert_eq!(records[0].category, "Drone Sighting");
        assert_eq!(records[0].agency_code, "14005");
    }

    #[test]
    fn wrapped_rows_are_not_merged() {
        let page = format!(
            "{HEADER}\n8/1/2024 1:00  2024-00000001  100 MAIN ST\nFraud  OK0140200"
        );

        assert!(extract_page(&page).is_empty());
    }

    #[test]
    fn every_page_drops_its_own_header() {
        let page_one = format!(
            "{HEADER}\n8/1/2024 0:04  2024-00055419  1935 W LINDSEY ST  Traffic Stop  OK0140200"
        );
        let page_two = format!(
            "{HEADER}\n8/1/2024 0:09  2024-00055420  1204 ELM AVE  Alarm  OK0140200\n8/1/2024 0:12  2024-00055421  300 PORTER AVE  Alarm  OK0140200"
        );

        let records = extract(&[page_one.as_str(), page_two.as_str()]);

        let numbers: Vec<&str> = records.iter().map(|r| r.case_number.as_str()).collect();
        assert_eq!(
            numbers,
            vec!["2024-00055419", "2024-00055420", "2024-00055421"]
        );
    }

    #[test]
    fn total_equals_sum_of_pages() {
        let pages = vec![
            format!("{HEADER}\n8/1/2024 0:04  2024-1  A ST  Alarm  OK0140200"),
            String::from("Daily Incident Summary (Public)\n"),
            format!("{HEADER}\n8/1/2024 0:05  2024-2  B ST  Fraud  OK0140200\n8/1/2024 0:06  2024-3  C ST  Fraud  OK0140200"),
        ];

        let per_page: Vec<IncidentRecord> = pages.iter().flat_map(|p| extract_page(p)).collect();
        let (all, stats) = extract_with_stats(&pages);

        assert_eq!(all, per_page);
        assert_eq!(stats.pages, 3);
        assert_eq!(stats.header_rows, 2);
        assert_eq!(stats.records, 3);
        assert_eq!(stats.candidate_rows, 5);
        assert_eq!(stats.dropped_lines(), stats.lines - 5);
    }

    #[test]
    fn extraction_is_deterministic() {
        let pages = [format!(
            "{HEADER}\n8/1/2024 0:04  2024-1  A ST  Alarm  OK0140200\njunk line\n8/1/2024 0:05  2024-2  B ST  Fraud  OK0140200"
        )];

        assert_eq!(extract(&pages), extract(&pages));
    }

    #[test]
    fn accepted_records_have_non_empty_fields() {
        let page = format!(
            "{HEADER}\n  8/1/2024 0:04    2024-1  A ST  Alarm  OK0140200  \n   \n  x  y  \n8/1/2024 0:05  2024-2  B ST  Fraud  14009"
        );

        let records = extract_page(&page);

        assert_eq!(records.len(), 2);
        assert!(
            records
                .iter()
                .all(|r| r.fields().iter().all(|field| !field.is_empty()))
        );
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(extract::<&str>(&[]).is_empty());
        assert!(extract_page("").is_empty());
    }
}
