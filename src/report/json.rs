use crate::models::{FileResult, RunReport};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub fn build_report(results: Vec<FileResult>) -> RunReport {
    RunReport {
        generated_at: chrono::Utc::now().naive_utc().to_string(),
        results,
    }
}

pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}
