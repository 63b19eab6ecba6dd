use anyhow::{Context, Result};
use dotenvy::dotenv;

/// Knobs for the profiling engine. Everything that was a module-level
/// constant in earlier incarnations of this tool lives here so the loaders
/// and the date sniffer receive it explicitly.
#[derive(Debug, Clone)]
pub struct ProfilerConfig {
    /// Candidate text encodings for delimited files, tried in order.
    pub candidate_encodings: Vec<String>,
    /// How many non-missing values the date sniffer samples per column.
    pub date_sample_size: usize,
    /// Reserved for future streaming support; the engine loads files whole.
    pub csv_chunk_size: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            candidate_encodings: vec![
                "utf-8".to_string(),
                "latin1".to_string(),
                "utf-16".to_string(),
            ],
            date_sample_size: 50,
            csv_chunk_size: 200_000,
        }
    }
}

impl ProfilerConfig {
    pub fn from_env() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        let mut config = Self::default();
        if let Ok(raw) = std::env::var("PROFILER_ENCODINGS") {
            config.candidate_encodings = raw
                .split(',')
                .map(|enc| enc.trim().to_string())
                .filter(|enc| !enc.is_empty())
                .collect();
        }
        if let Ok(raw) = std::env::var("PROFILER_DATE_SAMPLE_SIZE") {
            config.date_sample_size = raw
                .parse()
                .context("invalid PROFILER_DATE_SAMPLE_SIZE")?;
        }
        if let Ok(raw) = std::env::var("PROFILER_CSV_CHUNK_SIZE") {
            config.csv_chunk_size = raw.parse().context("invalid PROFILER_CSV_CHUNK_SIZE")?;
        }
        Ok(config)
    }
}
