use crate::error::AppError;
use crate::models::{Cell, RawTable};
use std::path::Path;

/// Markers pandas-style readers treat as missing, besides the empty field.
const NA_MARKERS: &[&str] = &["NA", "N/A", "n/a", "null", "NULL", "NaN", "nan", "#N/A"];

/// Read a delimited-text file, trying each candidate encoding in order.
/// The first encoding that decodes and parses cleanly wins and is returned
/// alongside the table; if every candidate fails the error carries the last
/// attempt's detail.
pub fn read_csv(path: &Path, encodings: &[String]) -> Result<(RawTable, String), AppError> {
    let bytes = std::fs::read(path)?;

    let mut last_error = format!("no candidate encodings configured for {}", path.display());
    for encoding in encodings {
        match decode(encoding, &bytes) {
            Ok(text) => match parse_records(&text) {
                Ok(table) => return Ok((table, encoding.clone())),
                Err(e) => last_error = e.to_string(),
            },
            Err(detail) => last_error = detail,
        }
    }
    Err(AppError::CsvRead(last_error))
}

/// Strict decode under exactly the candidate encoding: malformed input is a
/// failure, never a replacement character. A leading BOM matching the
/// candidate is stripped, but a BOM is not allowed to switch the attempt to
/// a different encoding.
fn decode(label: &str, bytes: &[u8]) -> Result<String, String> {
    let encoding = encoding_rs::Encoding::for_label(label.as_bytes())
        .ok_or_else(|| format!("unknown encoding label: {label}"))?;
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(format!("malformed input for encoding {label}"));
    }
    Ok(text.into_owned())
}

fn parse_records(text: &str) -> Result<RawTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        // Flexible mode lets ragged records through; pad or truncate to the
        // header width so the table invariant holds.
        let row: Vec<Cell> = (0..columns.len())
            .map(|idx| record.get(idx).map_or(Cell::Empty, coerce_cell))
            .collect();
        rows.push(row);
    }

    Ok(RawTable { columns, rows })
}

/// Per-field coercion into the cell's native type. Type inference over the
/// whole column happens later, in the profiler; this only types single cells.
fn coerce_cell(field: &str) -> Cell {
    let trimmed = field.trim();
    if trimmed.is_empty() || NA_MARKERS.contains(&trimmed) {
        return Cell::Empty;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return Cell::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Cell::Bool(false);
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return Cell::Int(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Cell::Float(f);
    }

    Cell::Str(field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(bytes: &[u8], suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn coerce_cell_types_single_fields() {
        assert_eq!(coerce_cell(""), Cell::Empty);
        assert_eq!(coerce_cell("NA"), Cell::Empty);
        assert_eq!(coerce_cell("  "), Cell::Empty);
        assert_eq!(coerce_cell("42"), Cell::Int(42));
        assert_eq!(coerce_cell("4.5"), Cell::Float(4.5));
        assert_eq!(coerce_cell("TRUE"), Cell::Bool(true));
        assert_eq!(coerce_cell("hola"), Cell::Str("hola".to_string()));
    }

    #[test]
    fn utf8_file_reads_under_first_encoding() {
        let file = write_temp(b"nombre,edad\nAna,31\nLuis,28\n", ".csv");
        let encodings = vec!["utf-8".to_string(), "latin1".to_string()];
        let (table, encoding) = read_csv(file.path(), &encodings).unwrap();
        assert_eq!(encoding, "utf-8");
        assert_eq!(table.height(), 2);
        assert_eq!(table.columns, ["nombre", "edad"]);
        assert_eq!(table.rows[0][1], Cell::Int(31));
    }

    #[test]
    fn latin1_file_falls_back_past_utf8() {
        // "año" in latin1: 0xF1 is invalid UTF-8.
        let bytes = b"a\xF1o,valor\n2020,1\n";
        let file = write_temp(bytes, ".csv");
        let encodings = vec!["utf-8".to_string(), "latin1".to_string()];
        let (table, encoding) = read_csv(file.path(), &encodings).unwrap();
        assert_eq!(encoding, "latin1");
        assert_eq!(table.columns[0], "año");
    }

    #[test]
    fn exhausted_encodings_report_last_failure() {
        let bytes = b"a\xF1o,valor\n2020,1\n";
        let file = write_temp(bytes, ".csv");
        let encodings = vec!["utf-8".to_string()];
        let err = read_csv(file.path(), &encodings).unwrap_err();
        assert!(matches!(err, AppError::CsvRead(_)));
        assert!(err.to_string().contains("utf-8"));
    }

    #[test]
    fn ragged_rows_are_padded_to_header_width() {
        let file = write_temp(b"a,b,c\n1,2\n1,2,3,4\n", ".csv");
        let encodings = vec!["utf-8".to_string()];
        let (table, _) = read_csv(file.path(), &encodings).unwrap();
        assert_eq!(table.rows[0], vec![Cell::Int(1), Cell::Int(2), Cell::Empty]);
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn utf16_file_decodes_via_bom() {
        let text = "id,fecha\n1,2021-01-15\n";
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let file = write_temp(&bytes, ".csv");
        let encodings = vec!["utf-8".to_string(), "utf-16".to_string()];
        let (table, encoding) = read_csv(file.path(), &encodings).unwrap();
        assert_eq!(encoding, "utf-16");
        assert_eq!(table.columns, ["id", "fecha"]);
    }
}
