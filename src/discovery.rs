//! Recursive suite-tree discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::SuiteConfig;
use crate::error::HarnessError;

/// Recursively collects files under `root` accepted by `keep`.
///
/// The returned list is sorted to ensure deterministic processing order. A
/// missing root yields an empty list rather than an error: an empty suite or
/// a run that produced no generated output is not a harness fault.
fn discover<P, F>(root: P, keep: F) -> Result<Vec<PathBuf>, HarnessError>
where
    P: AsRef<Path>,
    F: Fn(&Path) -> bool,
{
    if !root.as_ref().exists() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if keep(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// All source style files under the suite's source root.
pub fn discover_source_files(config: &SuiteConfig) -> Result<Vec<PathBuf>, HarnessError> {
    discover(config.source_root(), |p| config.is_source_file(p))
}

/// All generated output files under the suite's generated root.
pub fn discover_generated_files(config: &SuiteConfig) -> Result<Vec<PathBuf>, HarnessError> {
    discover(config.generated_root(), |p| config.is_output_file(p))
}
