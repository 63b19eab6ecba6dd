use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::path::Path;

pub const SAMPLE_VALUES: usize = 5;

/// A single loaded cell. `Empty` is the missing-value sentinel; every other
/// variant keeps the value in its post-load native type so that uniqueness
/// and duplicate checks never collapse values that merely format alike.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Str(String),
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Hashable identity used for uniqueness and duplicate detection.
    /// Floats compare by bit pattern, so 1i64 and 1.0f64 stay distinct.
    pub fn key(&self) -> CellKey<'_> {
        match self {
            Cell::Empty => CellKey::Empty,
            Cell::Int(i) => CellKey::Int(*i),
            Cell::Float(f) => CellKey::Float(f.to_bits()),
            Cell::Bool(b) => CellKey::Bool(*b),
            Cell::DateTime(dt) => CellKey::DateTime(*dt),
            Cell::Str(s) => CellKey::Str(s),
        }
    }

    /// Stringified form used for sample values.
    pub fn render(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => f.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Cell::Str(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKey<'a> {
    Empty,
    Int(i64),
    Float(u64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Str(&'a str),
}

/// One loaded file: normalized column names plus row-major cells.
/// Invariant: every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnSummary {
    pub dtype: String,
    pub missing_count: u64,
    pub pct_missing: f64,
    pub n_unique: u64,
    pub sample_values: SmallVec<[String; SAMPLE_VALUES]>,
    pub is_date: bool,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
    pub n_duplicated_cells_in_column: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableSummary {
    pub rows: u64,
    pub cols: u64,
    pub n_duplicated_rows: u64,
    pub memory_bytes: u64,
    pub columns: IndexMap<String, ColumnSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileResult {
    pub path: String,
    pub ok: bool,
    pub error: Option<String>,
    pub read_encoding: Option<String>,
    pub summary: Option<TableSummary>,
}

impl FileResult {
    pub fn success(path: &Path, read_encoding: Option<String>, summary: TableSummary) -> Self {
        Self {
            path: path.display().to_string(),
            ok: true,
            error: None,
            read_encoding,
            summary: Some(summary),
        }
    }

    pub fn failure(path: &Path, read_encoding: Option<String>, error: String) -> Self {
        Self {
            path: path.display().to_string(),
            ok: false,
            error: Some(error),
            read_encoding,
            summary: None,
        }
    }
}

/// Machine-readable record for a whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: String,
    pub results: Vec<FileResult>,
}

/// Per-file rollup row for tabular/CSV consumption.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverviewRow {
    pub path: String,
    pub status: String,
    pub rows: Option<u64>,
    pub cols: Option<u64>,
    pub missing_cols_count: u64,
    pub avg_pct_missing_per_col: Option<f64>,
    pub read_encoding: Option<String>,
}

impl OverviewRow {
    pub fn from_result(result: &FileResult) -> Self {
        let status = if result.ok { "OK" } else { "ERROR" };
        let (rows, cols) = match &result.summary {
            Some(s) => (Some(s.rows), Some(s.cols)),
            None => (None, None),
        };
        let mut missing_cols_count = 0;
        let mut avg_pct_missing_per_col = None;
        if let Some(summary) = &result.summary {
            missing_cols_count = summary
                .columns
                .values()
                .filter(|c| c.pct_missing > 0.0)
                .count() as u64;
            let total: f64 = summary.columns.values().map(|c| c.pct_missing).sum();
            avg_pct_missing_per_col = Some(round4(total / summary.columns.len().max(1) as f64));
        }
        Self {
            path: result.path.clone(),
            status: status.to_string(),
            rows,
            cols,
            missing_cols_count,
            avg_pct_missing_per_col,
            read_encoding: result.read_encoding.clone(),
        }
    }
}

pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_and_int_cells_stay_distinct() {
        assert_ne!(Cell::Int(1).key(), Cell::Float(1.0).key());
        assert_ne!(Cell::Str("1".into()).key(), Cell::Int(1).key());
    }

    #[test]
    fn round4_keeps_four_decimals() {
        assert_eq!(round4(1.0 / 3.0), 0.3333);
        assert_eq!(round4(0.0), 0.0);
    }

    #[test]
    fn file_result_round_trips_through_json() {
        let mut columns = IndexMap::new();
        columns.insert(
            "edad".to_string(),
            ColumnSummary {
                dtype: "int64".to_string(),
                missing_count: 1,
                pct_missing: 0.3333,
                n_unique: 2,
                sample_values: SmallVec::from_vec(vec!["1".to_string(), "2".to_string()]),
                is_date: false,
                min_date: None,
                max_date: None,
                n_duplicated_cells_in_column: 0,
            },
        );
        let original = FileResult {
            path: "data/personas.csv".to_string(),
            ok: true,
            error: None,
            read_encoding: Some("latin1".to_string()),
            summary: Some(TableSummary {
                rows: 3,
                cols: 1,
                n_duplicated_rows: 0,
                memory_bytes: 120,
                columns,
            }),
        };

        let encoded = serde_json::to_string(&original).unwrap();
        let decoded: FileResult = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn overview_row_for_failed_file_has_no_counts() {
        let result = FileResult::failure(Path::new("bad.bin"), None, "unsupported".into());
        let row = OverviewRow::from_result(&result);
        assert_eq!(row.status, "ERROR");
        assert_eq!(row.rows, None);
        assert_eq!(row.avg_pct_missing_per_col, None);
        assert_eq!(row.missing_cols_count, 0);
    }
}
