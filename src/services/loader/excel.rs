use crate::error::AppError;
use crate::models::{Cell, RawTable};
use bytes::Bytes;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use std::path::Path;

/// Read the first worksheet of an `.xls`/`.xlsx` workbook. A single reader
/// attempt; any failure surfaces as `ExcelRead` with the reader's message.
pub fn read_excel(path: &Path) -> Result<RawTable, AppError> {
    let file_data = Bytes::from(std::fs::read(path)?);
    let cursor = Cursor::new(file_data.as_ref());

    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| AppError::ExcelRead(format!("failed to open workbook: {e}")))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first_sheet = sheet_names
        .first()
        .ok_or_else(|| AppError::ExcelRead("no sheets found in workbook".to_string()))?;

    let range = workbook
        .worksheet_range(first_sheet)
        .map_err(|e| AppError::ExcelRead(e.to_string()))?;

    let mut row_iter = range.rows();
    let columns: Vec<String> = row_iter
        .next()
        .map(|header| header.iter().map(|cell| cell.to_string()).collect())
        .unwrap_or_default();

    let rows: Vec<Vec<Cell>> = row_iter
        .map(|row| {
            (0..columns.len())
                .map(|idx| row.get(idx).map_or(Cell::Empty, convert_cell))
                .collect()
        })
        .collect();

    Ok(RawTable { columns, rows })
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => Cell::DateTime(naive),
            // Out-of-range serials keep their raw numeric form.
            None => Cell::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Str(s.clone()),
        Data::Error(e) => Cell::Str(e.to_string()),
        Data::String(s) => {
            if s.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Str(s.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workbook_open_failure_is_excel_read_error() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        use std::io::Write;
        file.write_all(b"this is not a zip archive").unwrap();
        let err = read_excel(file.path()).unwrap_err();
        assert!(matches!(err, AppError::ExcelRead(_)));
    }

    #[test]
    fn string_cells_with_only_whitespace_are_missing() {
        assert_eq!(convert_cell(&Data::String("  ".to_string())), Cell::Empty);
        assert_eq!(
            convert_cell(&Data::String("ok".to_string())),
            Cell::Str("ok".to_string())
        );
    }
}
