use super::analysis;
use crate::config::ProfilerConfig;
use crate::models::FileResult;
use anyhow::{bail, Context, Result};
use glob::{glob_with, MatchOptions};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

const RECOGNIZED_EXTENSIONS: &[&str] = &["csv", "xls", "xlsx"];

/// Enumerate candidate files under the root, recursively, filtered to the
/// recognized extensions. Paths come back sorted so a fixed directory tree
/// always yields the same report. An unusable root is the one fatal error
/// of a run.
pub fn walk_corpus(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        bail!("root directory not found: {}", root.display());
    }

    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::default()
    };

    let mut paths = Vec::new();
    for extension in RECOGNIZED_EXTENSIONS {
        let pattern = format!("{}/**/*.{extension}", root.display());
        let matches = glob_with(&pattern, options)
            .with_context(|| format!("invalid glob pattern '{pattern}'"))?;
        for entry in matches {
            let path = entry.context("unreadable directory entry")?;
            if path.is_file() {
                paths.push(path);
            }
        }
    }

    paths.sort();
    paths.dedup();
    Ok(paths)
}

/// Walk the corpus and profile every candidate file. Analyses run in
/// parallel (each file's profiling is independent and side-effect-free) but
/// the result sequence keeps the traversal order, so downstream reports are
/// deterministic.
pub fn analyze_corpus(root: &Path, config: &ProfilerConfig) -> Result<Vec<FileResult>> {
    let paths = walk_corpus(root)?;
    tracing::info!("found {} candidate files under {}", paths.len(), root.display());

    let results: Vec<FileResult> = paths
        .par_iter()
        .map(|path| analysis::analyze_file(path, config))
        .collect();
    Ok(results)
}
