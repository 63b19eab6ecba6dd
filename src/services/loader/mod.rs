pub mod csv;
pub mod excel;

use crate::config::ProfilerConfig;
use crate::error::AppError;
use crate::models::RawTable;
use std::collections::HashSet;
use std::path::Path;

/// A successfully loaded table plus the encoding it was read under
/// (delimited text only; spreadsheet reads carry `None`).
#[derive(Debug)]
pub struct LoadedTable {
    pub table: RawTable,
    pub encoding: Option<String>,
}

/// Dispatch on the (case-insensitive) file extension, load, and normalize
/// column names. Type inference is deliberately not done here; that is the
/// profiler's job.
pub fn load(path: &Path, config: &ProfilerConfig) -> Result<LoadedTable, AppError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let mut loaded = match extension.as_deref() {
        Some("csv") => {
            let (table, encoding) = csv::read_csv(path, &config.candidate_encodings)?;
            LoadedTable {
                table,
                encoding: Some(encoding),
            }
        }
        Some("xls") | Some("xlsx") => LoadedTable {
            table: excel::read_excel(path)?,
            encoding: None,
        },
        Some(other) => return Err(AppError::UnsupportedFormat(format!(".{other}"))),
        None => return Err(AppError::UnsupportedFormat("(none)".to_string())),
    };

    normalize_columns(&mut loaded.table);
    Ok(loaded)
}

/// Strip surrounding whitespace from every column name. Names that collide
/// after stripping get a numeric suffix instead of silently overwriting the
/// earlier column in the summary mapping.
fn normalize_columns(table: &mut RawTable) {
    let mut existing_names = HashSet::new();
    for name in &mut table.columns {
        let stripped = name.trim().to_string();
        let mut candidate = stripped.clone();
        let mut counter = 1;
        while !existing_names.insert(candidate.clone()) {
            candidate = format!("{stripped}_{counter}");
            counter += 1;
        }
        *name = candidate;
    }
}
