use thiserror::Error;

/// Per-file failure taxonomy. Every variant is caught at the file-analysis
/// boundary and recorded in the corresponding `FileResult`; none of them
/// aborts a corpus run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("unsupported extension: {0}")]
    UnsupportedFormat(String),

    /// All candidate encodings were exhausted; carries the last attempt's
    /// failure detail.
    #[error("CSV read error: {0}")]
    CsvRead(String),

    #[error("Excel read error: {0}")]
    ExcelRead(String),

    /// Unexpected failure while computing statistics on a loaded table.
    #[error("profiling error: {0}")]
    Profiling(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
