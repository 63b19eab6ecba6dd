use super::dates::DateSniffer;
use crate::models::{round4, Cell, CellKey, ColumnSummary, SAMPLE_VALUES};
use smallvec::SmallVec;
use std::collections::HashSet;

/// Profile one column in a single pass: missing rate, cardinality, first
/// distinct samples, duplicate-cell count, dtype classification, and date
/// detection. Total for any input, including the zero-row column.
pub fn profile_column(cells: &[&Cell], sniffer: &DateSniffer) -> ColumnSummary {
    let rows = cells.len();

    let mut missing_count = 0u64;
    let mut uniques: HashSet<CellKey> = HashSet::new();
    let mut n_unique = 0u64;
    let mut sample_values: SmallVec<[String; SAMPLE_VALUES]> = SmallVec::new();

    for cell in cells {
        if cell.is_missing() {
            missing_count += 1;
        }
        if uniques.insert(cell.key()) && !cell.is_missing() {
            n_unique += 1;
            if sample_values.len() < SAMPLE_VALUES {
                sample_values.push(cell.render());
            }
        }
    }

    // Missing counts as its own value class, so the duplicate count is just
    // rows minus first-occurrences.
    let n_duplicated_cells_in_column = rows as u64 - uniques.len() as u64;
    let pct_missing = round4(missing_count as f64 / rows.max(1) as f64);

    let detection = sniffer.detect(cells);

    ColumnSummary {
        dtype: classify_dtype(cells).to_string(),
        missing_count,
        pct_missing,
        n_unique,
        sample_values,
        is_date: detection.is_date,
        min_date: detection.min_date,
        max_date: detection.max_date,
        n_duplicated_cells_in_column,
    }
}

/// Explicit classification over the loaded cells' native types, with a fixed
/// closed set of labels. Integers widen to float when mixed with floats;
/// any other mixture is `object`.
pub fn classify_dtype(cells: &[&Cell]) -> &'static str {
    let mut ints = 0usize;
    let mut floats = 0usize;
    let mut bools = 0usize;
    let mut datetimes = 0usize;
    let mut strs = 0usize;

    for cell in cells {
        match cell {
            Cell::Empty => {}
            Cell::Int(_) => ints += 1,
            Cell::Float(_) => floats += 1,
            Cell::Bool(_) => bools += 1,
            Cell::DateTime(_) => datetimes += 1,
            Cell::Str(_) => strs += 1,
        }
    }

    let total = ints + floats + bools + datetimes + strs;
    if total == 0 {
        "empty"
    } else if ints == total {
        "int64"
    } else if ints + floats == total {
        "float64"
    } else if bools == total {
        "bool"
    } else if datetimes == total {
        "datetime64"
    } else if strs == total {
        "str"
    } else {
        "object"
    }
}
