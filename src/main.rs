use anyhow::Result;
use clap::Parser;
use dataset_profiler::{config, logging, report, services};
use std::path::PathBuf;

/// Profile a directory tree of CSV and Excel datasets.
#[derive(Parser, Debug)]
#[command(name = "dataset-profiler", version)]
struct Cli {
    /// Root directory to scan recursively
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Output path for the full JSON report
    #[arg(long, default_value = "reporte_datasets.json")]
    out: PathBuf,

    /// Output path for the per-file CSV rollup
    #[arg(long = "csv-summary", default_value = "resumen_datasets.csv")]
    csv_summary: PathBuf,

    /// Optional output path for the paginated text report
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init_logging()?;

    let cli = Cli::parse();
    let profiler_config = config::ProfilerConfig::from_env()?;

    let results = services::walker::analyze_corpus(&cli.root, &profiler_config)?;
    let run_report = report::json::build_report(results);

    report::json::write_report(&cli.out, &run_report)?;
    let overview = report::rollup::overview_rows(&run_report.results);
    report::rollup::write_rollup(&cli.csv_summary, &overview)?;
    if let Some(document_path) = &cli.report {
        report::document::write_document(document_path, &run_report)?;
    }

    println!("\nResumen:");
    for line in report::document::summary_table_lines(&run_report.results) {
        println!("{line}");
    }
    println!("\nJSON completo: {}", cli.out.display());
    println!("CSV resumen: {}", cli.csv_summary.display());

    Ok(())
}
