#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident record types shared by the extractor, the store, and the
//! summary report.
//!
//! Every field is kept as free text. Timestamps are not parsed and the
//! incident nature is an open vocabulary, so new values published by the
//! department flow through unchanged.

use std::fmt;

/// Number of positional columns in a daily incident summary row.
pub const FIELD_COUNT: usize = 5;

/// A single row of the daily incident summary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IncidentRecord {
    /// Date and time as printed (`M/D/YYYY H:MM`).
    pub occurred_at: String,
    /// Incident number, e.g. `2024-00012345`.
    pub case_number: String,
    /// Location description.
    pub location: String,
    /// Incident nature (category).
    pub category: String,
    /// Originating agency identifier (ORI).
    pub agency_code: String,
}

impl IncidentRecord {
    /// Builds a record from positional field tokens.
    ///
    /// Only the first [`FIELD_COUNT`] tokens are used; anything after
    /// them is ignored. Returns `None` when fewer tokens are supplied.
    #[must_use]
    pub fn from_fields(fields: &[&str]) -> Option<Self> {
        let [occurred_at, case_number, location, category, agency_code, ..] = fields else {
            return None;
        };

        Some(Self {
            occurred_at: occurred_at.trim().to_owned(),
            case_number: case_number.trim().to_owned(),
            location: location.trim().to_owned(),
            category: category.trim().to_owned(),
            agency_code: agency_code.trim().to_owned(),
        })
    }

    /// Returns the fields in storage column order.
    #[must_use]
    pub fn fields(&self) -> [&str; FIELD_COUNT] {
        [
            &self.occurred_at,
            &self.case_number,
            &self.location,
            &self.category,
            &self.agency_code,
        ]
    }
}

/// Number of stored incidents sharing one nature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

impl fmt::Display for CategoryCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.category, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_record_from_first_five_fields() {
        let record = IncidentRecord::from_fields(&[
            "8/1/2024 10:00",
            "2024-00012345",
            " 123 Main St ",
            "Traffic Stop",
            "OK0140200",
            "leftover",
        ])
        .unwrap();

        assert_eq!(record.occurred_at, "8/1/2024 10:00");
        assert_eq!(record.case_number, "2024-00012345");
        assert_eq!(record.location, "123 Main St");
        assert_eq!(record.category, "Traffic Stop");
        assert_eq!(record.agency_code, "OK0140200");
    }

    #[test]
    fn rejects_short_field_list() {
        assert!(IncidentRecord::from_fields(&["a", "b", "c", "d"]).is_none());
        assert!(IncidentRecord::from_fields(&[]).is_none());
    }

    #[test]
    fn fields_follow_column_order() {
        let record = IncidentRecord::from_fields(&["t", "n", "l", "c", "o"]).unwrap();
        assert_eq!(record.fields(), ["t", "n", "l", "c", "o"]);
    }

    #[test]
    fn category_count_displays_pipe_separated() {
        let count = CategoryCount {
            category: "Fraud".to_owned(),
            count: 3,
        };
        assert_eq!(count.to_string(), "Fraud|3");
    }
}
