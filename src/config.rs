//! Suite configuration: the three parallel roots, recognized extensions,
//! framework error sentinels, and console color behavior.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::HarnessError;

// Color constants for terminal output
pub const RESET: &str = "\x1b[0m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

/// Configuration for one suite run.
///
/// Every field has a default matching the conventional suite layout
/// (`test/sass/{input,expected-output,generated-output}`), so a suite only
/// needs a YAML file when it deviates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Directory containing the three parallel roots.
    pub suite_root: PathBuf,
    /// Leaf name of the source root.
    pub source_dir: String,
    /// Leaf name of the expected-output root.
    pub expected_dir: String,
    /// Leaf name of the generated-output root.
    pub generated_dir: String,
    /// Recognized source extensions, without dots.
    pub source_extensions: Vec<String>,
    /// Output extension shared by the expected and generated roots.
    pub output_extension: String,
    /// Prefixes marking a compile error as a deliberate framework
    /// diagnostic. First entry is the current sentinel; later entries are
    /// legacy forms kept for old fixtures.
    pub sentinels: Vec<String>,
    #[serde(skip, default = "detect_colors")]
    pub use_colors: bool,
}

fn detect_colors() -> bool {
    atty::is(atty::Stream::Stdout)
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            suite_root: PathBuf::from("test/sass"),
            source_dir: "input".to_string(),
            expected_dir: "expected-output".to_string(),
            generated_dir: "generated-output".to_string(),
            source_extensions: vec!["sass".to_string(), "scss".to_string()],
            output_extension: "css".to_string(),
            sentinels: vec!["[SPOT CSS]".to_string(), "SPOT CSS: ".to_string()],
            use_colors: detect_colors(),
        }
    }
}

impl SuiteConfig {
    /// Load from a YAML file; fields absent in the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let content = fs::read_to_string(path).map_err(|e| HarnessError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| HarnessError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn source_root(&self) -> PathBuf {
        self.suite_root.join(&self.source_dir)
    }

    pub fn expected_root(&self) -> PathBuf {
        self.suite_root.join(&self.expected_dir)
    }

    pub fn generated_root(&self) -> PathBuf {
        self.suite_root.join(&self.generated_dir)
    }

    /// True if `path` carries one of the recognized source extensions.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.source_extensions.iter().any(|s| s == ext))
    }

    /// True if `path` carries the output extension.
    pub fn is_output_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext == self.output_extension)
    }

    /// Apply color formatting to text if colors are enabled.
    pub fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let config = SuiteConfig::default();
        assert_eq!(config.source_root(), PathBuf::from("test/sass/input"));
        assert_eq!(config.expected_root(), PathBuf::from("test/sass/expected-output"));
        assert_eq!(config.generated_root(), PathBuf::from("test/sass/generated-output"));
    }

    #[test]
    fn recognizes_both_source_extensions() {
        let config = SuiteConfig::default();
        assert!(config.is_source_file(Path::new("a.scss")));
        assert!(config.is_source_file(Path::new("a.sass")));
        assert!(!config.is_source_file(Path::new("a.css")));
        assert!(config.is_output_file(Path::new("a.css")));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: SuiteConfig = serde_yaml::from_str("suite_root: fixtures/suite").unwrap();
        assert_eq!(config.suite_root, PathBuf::from("fixtures/suite"));
        assert_eq!(config.source_dir, "input");
        assert_eq!(config.output_extension, "css");
    }
}
