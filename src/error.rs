use std::path::PathBuf;

use thiserror::Error;

/// Faults of the harness itself, as opposed to test failures.
///
/// Per-file problems (a compile error, a missing expected file, a content
/// mismatch) are never surfaced through this type; they are folded into the
/// [`RunReport`](crate::report::RunReport) and the run continues. This enum
/// covers only conditions under which a stage cannot proceed at all: an
/// unreadable root, a broken directory walk, a watcher that will not start.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to watch for changes: {0}")]
    Watch(#[from] notify::Error),

    #[error("failed to read config {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl HarnessError {
    /// Attach path context to a bare I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
