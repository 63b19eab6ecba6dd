use crate::models::{FileResult, OverviewRow, RunReport};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

/// How many files get a per-column detail block.
const MAX_DETAIL_FILES: usize = 30;
/// Summary rows per page.
const SUMMARY_ROWS_PER_PAGE: usize = 40;
const PAGE_BREAK: char = '\u{c}';

/// Render the paginated report: a cover page with the run tally, the
/// per-file summary table, and per-column detail blocks for the first
/// `MAX_DETAIL_FILES` files.
pub fn render_document(report: &RunReport) -> String {
    let mut pages: Vec<String> = vec![render_cover(report)];

    let lines = summary_table_lines(&report.results);
    // First two lines are the header and its rule; repeat them on each page.
    let (header, body) = lines.split_at(2.min(lines.len()));
    for chunk in body.chunks(SUMMARY_ROWS_PER_PAGE.max(1)) {
        let mut page = String::from("RESUMEN POR ARCHIVO\n\n");
        for line in header.iter().chain(chunk.iter()) {
            page.push_str(line);
            page.push('\n');
        }
        pages.push(page);
    }

    for result in report.results.iter().take(MAX_DETAIL_FILES) {
        pages.push(render_detail(result));
    }
    if report.results.len() > MAX_DETAIL_FILES {
        pages.push(format!(
            "… {} more files omitted from the detail section\n",
            report.results.len() - MAX_DETAIL_FILES
        ));
    }

    let mut document = String::new();
    for (idx, page) in pages.iter().enumerate() {
        if idx > 0 {
            document.push(PAGE_BREAK);
        }
        document.push_str(page);
    }
    document
}

pub fn write_document(path: &Path, report: &RunReport) -> Result<()> {
    std::fs::write(path, render_document(report))
        .with_context(|| format!("failed to write report document {}", path.display()))?;
    Ok(())
}

fn render_cover(report: &RunReport) -> String {
    let ok = report.results.iter().filter(|r| r.ok).count();
    let failed = report.results.len() - ok;
    let mut page = String::new();
    let _ = writeln!(page, "REPORTE DE DATASETS");
    let _ = writeln!(page);
    let _ = writeln!(page, "generado: {}", report.generated_at);
    let _ = writeln!(page, "archivos analizados: {}", report.results.len());
    let _ = writeln!(page, "OK: {ok}");
    let _ = writeln!(page, "ERROR: {failed}");
    page
}

/// Fixed-width summary table, one row per file. Also printed to the console
/// at the end of a run.
pub fn summary_table_lines(results: &[FileResult]) -> Vec<String> {
    let path_width = results
        .iter()
        .map(|r| r.path.len())
        .chain(std::iter::once("path".len()))
        .max()
        .unwrap_or(4)
        .min(60);

    let mut lines = vec![
        format!(
            "{:<path_width$}  {:<6}  {:>8}  {:>5}  {:>7}  error",
            "path", "status", "rows", "cols", "miss%"
        ),
        "-".repeat(path_width + 40),
    ];

    for result in results {
        let overview = OverviewRow::from_result(result);
        let rows = overview.rows.map_or(String::new(), |r| r.to_string());
        let cols = overview.cols.map_or(String::new(), |c| c.to_string());
        let miss = overview
            .avg_pct_missing_per_col
            .map_or(String::new(), |pct| format!("{:.2}", pct * 100.0));
        let error = result.error.as_deref().unwrap_or("");
        lines.push(format!(
            "{:<path_width$}  {:<6}  {:>8}  {:>5}  {:>7}  {}",
            truncate(&result.path, path_width),
            overview.status,
            rows,
            cols,
            miss,
            error
        ));
    }
    lines
}

fn render_detail(result: &FileResult) -> String {
    let mut page = String::new();
    let _ = writeln!(page, "ARCHIVO: {}", result.path);
    let _ = writeln!(page);

    match &result.summary {
        Some(summary) => {
            let _ = writeln!(
                page,
                "{} filas x {} columnas, {} filas duplicadas, ~{} bytes",
                summary.rows, summary.cols, summary.n_duplicated_rows, summary.memory_bytes
            );
            if let Some(encoding) = &result.read_encoding {
                let _ = writeln!(page, "encoding: {encoding}");
            }
            let _ = writeln!(page);
            for (name, col) in &summary.columns {
                let _ = writeln!(
                    page,
                    "  {name}: {} | {:.2}% missing | {} unique | ejemplos: {}",
                    col.dtype,
                    col.pct_missing * 100.0,
                    col.n_unique,
                    col.sample_values.join(", ")
                );
                if col.is_date {
                    let _ = writeln!(
                        page,
                        "    rango de fechas: {} .. {}",
                        col.min_date.as_deref().unwrap_or("?"),
                        col.max_date.as_deref().unwrap_or("?")
                    );
                }
            }
        }
        None => {
            let _ = writeln!(page, "ERROR: {}", result.error.as_deref().unwrap_or(""));
        }
    }
    page
}

fn truncate(text: &str, width: usize) -> String {
    if text.len() <= width {
        text.to_string()
    } else {
        let cut = text
            .char_indices()
            .rev()
            .find(|(idx, _)| *idx <= width.saturating_sub(1))
            .map_or(0, |(idx, _)| idx);
        format!("{}…", &text[..cut])
    }
}
