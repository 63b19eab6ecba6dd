use crate::models::Cell;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Structural pre-check before trying the format list. Anything that does
/// not look like `yyyy-mm-dd`-style separators, an 8-digit compact date, or
/// an ISO timestamp is rejected without touching chrono.
static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,4}-\d{1,2}-\d{1,4}([ T].+)?|\d{1,4}/\d{1,2}/\d{1,4}([ T].+)?|\d{8})$")
        .expect("valid date shape pattern")
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%Y%m%d",
];

#[derive(Debug, Clone, PartialEq)]
pub struct DateDetection {
    pub is_date: bool,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
}

impl DateDetection {
    fn none() -> Self {
        Self {
            is_date: false,
            min_date: None,
            max_date: None,
        }
    }
}

/// Sample-then-verify date detection. The sample is a strict gate: one
/// unparseable value among the first `sample_size` non-missing values rules
/// the whole column out before paying the full-column parse.
#[derive(Debug, Clone)]
pub struct DateSniffer {
    sample_size: usize,
}

impl DateSniffer {
    pub fn new(sample_size: usize) -> Self {
        Self { sample_size }
    }

    pub fn detect(&self, column: &[&Cell]) -> DateDetection {
        let non_missing: Vec<&Cell> = column
            .iter()
            .copied()
            .filter(|cell| !cell.is_missing())
            .collect();
        if non_missing.is_empty() {
            return DateDetection::none();
        }

        for cell in non_missing.iter().take(self.sample_size) {
            if parse_cell(cell).is_none() {
                return DateDetection::none();
            }
        }

        // Error-tolerant full-column pass: unparseable values drop out of
        // the range instead of aborting the column.
        let parsed: Vec<NaiveDateTime> = non_missing.iter().filter_map(|c| parse_cell(c)).collect();
        if parsed.is_empty() {
            return DateDetection::none();
        }

        DateDetection {
            is_date: true,
            min_date: parsed.iter().min().map(format_timestamp),
            max_date: parsed.iter().max().map(format_timestamp),
        }
    }
}

fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn parse_cell(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::DateTime(dt) => Some(*dt),
        Cell::Str(s) => parse_datetime_str(s.trim()),
        _ => None,
    }
}

/// Lenient but non-fuzzy parse: the value as a whole must match one of the
/// known date shapes, no scanning for date-like substrings.
pub fn parse_datetime_str(value: &str) -> Option<NaiveDateTime> {
    if !DATE_SHAPE.is_match(value) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date.and_hms_opt(0, 0, 0)?);
        }
    }
    None
}
