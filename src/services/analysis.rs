use super::loader;
use super::profiler::TableProfiler;
use crate::config::ProfilerConfig;
use crate::models::FileResult;
use std::path::Path;

/// Analyze one file end to end: extension check, load, profile. Total —
/// every failure is captured in the returned `FileResult`, nothing
/// propagates past this boundary.
pub fn analyze_file(path: &Path, config: &ProfilerConfig) -> FileResult {
    tracing::info!("analyzing {}", path.display());

    let loaded = match loader::load(path, config) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::warn!("failed to load {}: {}", path.display(), e);
            return FileResult::failure(path, None, e.to_string());
        }
    };

    let profiler = TableProfiler::new(config);
    match profiler.profile(&loaded.table) {
        Ok(summary) => FileResult::success(path, loaded.encoding, summary),
        Err(e) => {
            tracing::warn!("failed to profile {}: {}", path.display(), e);
            // The load succeeded, so the read encoding is still reported.
            FileResult::failure(path, loaded.encoding, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_csv(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn successful_analysis_carries_summary_and_encoding() {
        let file = temp_csv(b"nombre,edad\nAna,31\nLuis,28\nEva,40\n");
        let result = analyze_file(file.path(), &ProfilerConfig::default());
        assert!(result.ok);
        assert_eq!(result.error, None);
        assert_eq!(result.read_encoding.as_deref(), Some("utf-8"));
        let summary = result.summary.unwrap();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.cols, 2);
    }

    #[test]
    fn unsupported_extension_is_a_captured_failure() {
        let mut file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        file.write_all(b"whatever").unwrap();
        let result = analyze_file(file.path(), &ProfilerConfig::default());
        assert!(!result.ok);
        assert_eq!(result.summary, None);
        assert!(result.error.unwrap().contains("unsupported"));
    }

    #[test]
    fn missing_file_is_a_captured_failure_not_a_panic() {
        let result = analyze_file(
            Path::new("no/such/dir/datos.csv"),
            &ProfilerConfig::default(),
        );
        assert!(!result.ok);
        assert!(result.error.is_some());
    }

    #[test]
    fn analysis_is_idempotent_for_an_unmodified_file() {
        let file = temp_csv(b"a,b\n1,x\n1,x\n2,\n");
        let config = ProfilerConfig::default();
        let first = analyze_file(file.path(), &config);
        let second = analyze_file(file.path(), &config);
        assert_eq!(first, second);
    }
}
