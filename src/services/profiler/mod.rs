pub mod column;
pub mod dates;

use crate::config::ProfilerConfig;
use crate::error::AppError;
use crate::models::{Cell, CellKey, RawTable, TableSummary};
use column::profile_column;
use dates::DateSniffer;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::mem::size_of;

pub struct TableProfiler {
    sniffer: DateSniffer,
}

impl TableProfiler {
    pub fn new(config: &ProfilerConfig) -> Self {
        Self {
            sniffer: DateSniffer::new(config.date_sample_size),
        }
    }

    /// Profile a loaded table. Total for every well-formed table, including
    /// the zero-row case; a broken row-length invariant surfaces as a
    /// `Profiling` error instead of a panic so a pathological file cannot
    /// abort the corpus run.
    pub fn profile(&self, table: &RawTable) -> Result<TableSummary, AppError> {
        let cols = table.width();
        for (idx, row) in table.rows.iter().enumerate() {
            if row.len() != cols {
                return Err(AppError::Profiling(format!(
                    "row {idx} has {} cells, expected {cols}",
                    row.len()
                )));
            }
        }

        let rows = table.height();
        let n_duplicated_rows = count_duplicated_rows(table);
        let memory_bytes = estimate_memory_bytes(table);

        let mut columns = IndexMap::with_capacity(cols);
        for (idx, name) in table.columns.iter().enumerate() {
            let cells: Vec<&Cell> = table.rows.iter().map(|row| &row[idx]).collect();
            columns.insert(name.clone(), profile_column(&cells, &self.sniffer));
        }

        Ok(TableSummary {
            rows: rows as u64,
            cols: cols as u64,
            n_duplicated_rows,
            memory_bytes,
            columns,
        })
    }
}

/// Rows that exactly repeat an earlier row, compared across all columns by
/// the cells' native equality.
fn count_duplicated_rows(table: &RawTable) -> u64 {
    let mut seen: HashSet<Vec<CellKey>> = HashSet::with_capacity(table.height());
    let mut duplicated = 0u64;
    for row in &table.rows {
        let key: Vec<CellKey> = row.iter().map(Cell::key).collect();
        if !seen.insert(key) {
            duplicated += 1;
        }
    }
    duplicated
}

/// In-memory footprint estimate: enum-sized slots plus string heap bytes,
/// plus the per-row and per-name container overhead. An estimate of what the
/// table costs to hold, not its on-disk size.
fn estimate_memory_bytes(table: &RawTable) -> u64 {
    let mut bytes = size_of::<RawTable>();
    for name in &table.columns {
        bytes += size_of::<String>() + name.len();
    }
    for row in &table.rows {
        bytes += size_of::<Vec<Cell>>();
        for cell in row {
            bytes += size_of::<Cell>();
            if let Cell::Str(s) = cell {
                bytes += s.len();
            }
        }
    }
    bytes as u64
}
