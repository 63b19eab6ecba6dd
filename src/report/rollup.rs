use crate::models::{FileResult, OverviewRow};
use anyhow::{Context, Result};
use std::path::Path;

pub fn overview_rows(results: &[FileResult]) -> Vec<OverviewRow> {
    results.iter().map(OverviewRow::from_result).collect()
}

pub fn write_rollup(path: &Path, rows: &[OverviewRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create rollup file {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("failed to write rollup row")?;
    }
    writer.flush().context("failed to flush rollup file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{round4, ColumnSummary, TableSummary};
    use indexmap::IndexMap;
    use smallvec::SmallVec;
    use std::path::Path as StdPath;

    fn column(pct_missing: f64) -> ColumnSummary {
        ColumnSummary {
            dtype: "str".to_string(),
            missing_count: 0,
            pct_missing,
            n_unique: 1,
            sample_values: SmallVec::new(),
            is_date: false,
            min_date: None,
            max_date: None,
            n_duplicated_cells_in_column: 0,
        }
    }

    #[test]
    fn overview_averages_column_missing_rates() {
        let mut columns = IndexMap::new();
        columns.insert("a".to_string(), column(0.5));
        columns.insert("b".to_string(), column(0.0));
        columns.insert("c".to_string(), column(0.25));
        let result = FileResult::success(
            StdPath::new("datos.csv"),
            Some("utf-8".to_string()),
            TableSummary {
                rows: 4,
                cols: 3,
                n_duplicated_rows: 0,
                memory_bytes: 100,
                columns,
            },
        );

        let rows = overview_rows(&[result]);
        assert_eq!(rows[0].status, "OK");
        assert_eq!(rows[0].missing_cols_count, 2);
        assert_eq!(rows[0].avg_pct_missing_per_col, Some(round4(0.75 / 3.0)));
        assert_eq!(rows[0].read_encoding.as_deref(), Some("utf-8"));
    }

    #[test]
    fn rollup_file_round_trips_through_csv() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("resumen.csv");
        let rows = vec![OverviewRow {
            path: "datos.csv".to_string(),
            status: "ERROR".to_string(),
            rows: None,
            cols: None,
            missing_cols_count: 0,
            avg_pct_missing_per_col: None,
            read_encoding: None,
        }];
        write_rollup(&out, &rows).unwrap();

        let mut reader = csv::Reader::from_path(&out).unwrap();
        let parsed: Vec<OverviewRow> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(parsed, rows);
    }
}
