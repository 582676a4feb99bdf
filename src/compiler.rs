//! Compiler adapter: invokes the Sass compiler per source file, isolates
//! failures, and classifies compile errors.
//!
//! The style framework under test deliberately raises some of its
//! validation messages as compile errors (`@error` with a sentinel prefix).
//! Those are not test failures: the expected-output file for such a case is
//! literally a one-line CSS comment carrying the diagnostic, so the adapter
//! captures them as generated output. Every other compile error is an
//! unexpected failure for that one input and must not stop the batch.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{SuiteConfig, RED};
use crate::error::HarnessError;
use crate::paths;
use crate::report::RunReport;

/// Error object surfaced by a [`Compiler`], mirroring the three message
/// facets the original node-sass collaborator exposed.
#[derive(Debug, Clone)]
pub struct CompileError {
    /// Multi-line message including import-chain location lines.
    pub message: String,
    /// The unformatted error text exactly as the style sheet raised it.
    pub message_original: String,
    /// Console-ready rendition.
    pub message_formatted: String,
}

/// The external style-sheet compiler collaborator.
pub trait Compiler {
    /// Compile one source file to expanded CSS.
    fn compile(&self, path: &Path) -> Result<String, CompileError>;
}

/// Production compiler backed by grass, with expanded formatting.
pub struct SassCompiler;

impl Compiler for SassCompiler {
    fn compile(&self, path: &Path) -> Result<String, CompileError> {
        let options = grass::Options::default().style(grass::OutputStyle::Expanded);
        grass::from_path(path, &options).map_err(|e| {
            let formatted = e.to_string();
            // grass decorates the raised text with an "Error: " prefix and
            // quotes string payloads of @error; the original message is what
            // the sheet raised.
            let original = formatted.strip_prefix("Error: ").unwrap_or(&formatted);
            let original = original.strip_prefix('"').unwrap_or(original).to_string();
            CompileError {
                message: formatted.clone(),
                message_original: original,
                message_formatted: formatted,
            }
        })
    }
}

/// Structured classification of a compile error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Sentinel-prefixed diagnostic raised by the framework on purpose.
    /// `summary` is the original text up to the first " - " delimiter.
    FrameworkDiagnostic { summary: String },
    /// Any other compiler error; console-ready message.
    CompilerError { message: String },
    /// The error object had no usable message shape.
    ParseFailure { raw: String },
}

/// Classify a compile error against the configured sentinel prefixes.
pub fn classify(error: &CompileError, sentinels: &[String]) -> Classification {
    if error.message_original.is_empty() && error.message.is_empty() {
        return Classification::ParseFailure { raw: format!("{error:?}") };
    }
    if sentinels.iter().any(|s| error.message_original.starts_with(s.as_str())) {
        let summary = error
            .message_original
            .split(" - ")
            .next()
            .unwrap_or(&error.message_original)
            .to_string();
        Classification::FrameworkDiagnostic { summary }
    } else {
        Classification::CompilerError { message: error.message_formatted.clone() }
    }
}

static FROM_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"from line \d+ of ([^,\r\n]+)").unwrap());

fn under_root(path: &str, root_dir: &str) -> bool {
    path.contains(&format!("/{root_dir}/"))
        || path.contains(&format!("\\{root_dir}\\"))
        || path.starts_with(&format!("{root_dir}/"))
        || path.starts_with(&format!("{root_dir}\\"))
}

/// Extracts the source file an error originated in.
///
/// With `@import` chains the failing sheet is not necessarily the one being
/// compiled; the compiler names it in a "from line N of <path>" clause. Falls
/// back to the message's top line, then to the compiled file itself. A
/// candidate only counts if it actually lies under the source root,
/// otherwise it is error prose, not a path.
pub fn failing_source(error: &CompileError, compiled: &Path, source_dir: &str) -> String {
    let from_line = FROM_LINE
        .captures(&error.message)
        .map(|captures| captures[1].trim().to_string());
    let top_line = error
        .message
        .lines()
        .next()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string);

    from_line
        .into_iter()
        .chain(top_line)
        .find(|candidate| under_root(candidate, source_dir))
        .unwrap_or_else(|| compiled.to_string_lossy().into_owned())
}

/// Runs the compiler over source files one at a time, absorbing per-file
/// failures into the report.
pub struct CompilerAdapter<'a> {
    config: &'a SuiteConfig,
    compiler: &'a dyn Compiler,
}

impl<'a> CompilerAdapter<'a> {
    pub fn new(config: &'a SuiteConfig, compiler: &'a dyn Compiler) -> Self {
        Self { config, compiler }
    }

    /// Compile one source file into the generated root.
    ///
    /// A framework diagnostic becomes a `/* Error ... */` comment file and
    /// leaves the report untouched; an unexpected compiler error marks the
    /// run failed and writes nothing; a malformed error shape is dumped to
    /// the console and the run continues.
    pub fn compile_file(
        &self,
        source: &Path,
        report: &mut RunReport,
    ) -> Result<(), HarnessError> {
        match self.compiler.compile(source) {
            Ok(css) => {
                let target = self.generated_target(&source.to_string_lossy());
                write_creating_dirs(&target, &css)
            }
            Err(error) => match classify(&error, &self.config.sentinels) {
                Classification::FrameworkDiagnostic { summary } => {
                    let origin = failing_source(&error, source, &self.config.source_dir);
                    let target = self.generated_target(&origin);
                    write_creating_dirs(&target, &format!("/* Error {summary} */"))
                }
                Classification::CompilerError { message } => {
                    report.fail(self.config, Some(&message));
                    Ok(())
                }
                Classification::ParseFailure { raw } => {
                    eprintln!("{}", self.config.colorize("Unparseable compiler error:", RED));
                    eprintln!("{raw}");
                    Ok(())
                }
            },
        }
    }

    fn generated_target(&self, source: &str) -> PathBuf {
        let rebased = paths::rebase(source, &self.config.source_dir, &self.config.generated_dir);
        PathBuf::from(paths::swap_extension(&rebased, &self.config.output_extension))
    }
}

fn write_creating_dirs(target: &Path, content: &str) -> Result<(), HarnessError> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| HarnessError::io(parent, e))?;
    }
    fs::write(target, content).map_err(|e| HarnessError::io(target, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(original: &str, message: &str) -> CompileError {
        CompileError {
            message: message.to_string(),
            message_original: original.to_string(),
            message_formatted: message.to_string(),
        }
    }

    #[test]
    fn sentinel_error_is_framework_diagnostic() {
        let sentinels = SuiteConfig::default().sentinels;
        let err = error(
            "SPOT CSS: selector is not mobile-first - use min-width instead",
            "SPOT CSS: selector is not mobile-first - use min-width instead\n  on line 3",
        );
        assert_eq!(
            classify(&err, &sentinels),
            Classification::FrameworkDiagnostic {
                summary: "SPOT CSS: selector is not mobile-first".to_string()
            }
        );
    }

    #[test]
    fn bracketed_sentinel_is_recognized() {
        let sentinels = SuiteConfig::default().sentinels;
        let err = error("[SPOT CSS] invalid pseudo usage - see docs", "irrelevant");
        assert_eq!(
            classify(&err, &sentinels),
            Classification::FrameworkDiagnostic {
                summary: "[SPOT CSS] invalid pseudo usage".to_string()
            }
        );
    }

    #[test]
    fn summary_without_delimiter_is_whole_original() {
        let sentinels = SuiteConfig::default().sentinels;
        let err = error("[SPOT CSS] plain diagnostic", "x");
        assert_eq!(
            classify(&err, &sentinels),
            Classification::FrameworkDiagnostic {
                summary: "[SPOT CSS] plain diagnostic".to_string()
            }
        );
    }

    #[test]
    fn other_errors_are_compiler_errors() {
        let sentinels = SuiteConfig::default().sentinels;
        let err = error("Undefined variable: \"$accent\"", "Undefined variable: \"$accent\"");
        assert!(matches!(classify(&err, &sentinels), Classification::CompilerError { .. }));
    }

    #[test]
    fn empty_message_is_a_parse_failure() {
        let sentinels = SuiteConfig::default().sentinels;
        let err = error("", "");
        assert!(matches!(classify(&err, &sentinels), Classification::ParseFailure { .. }));
    }

    #[test]
    fn failing_source_prefers_from_line_clause() {
        let err = error(
            "x",
            "Undefined mixin\n        from line 12 of test/sass/input/forms/radio.scss, in mixin",
        );
        assert_eq!(
            failing_source(&err, Path::new("test/sass/input/entry.scss"), "input"),
            "test/sass/input/forms/radio.scss"
        );
    }

    #[test]
    fn failing_source_falls_back_to_top_line() {
        let err = error("x", "test/sass/input/broken.scss\nsome detail");
        assert_eq!(
            failing_source(&err, Path::new("ignored.scss"), "input"),
            "test/sass/input/broken.scss"
        );
    }

    #[test]
    fn failing_source_ignores_prose_top_line() {
        let err = error("x", "Undefined variable: \"$accent\"\nsome detail");
        assert_eq!(
            failing_source(&err, Path::new("test/sass/input/a.scss"), "input"),
            "test/sass/input/a.scss"
        );
    }

    #[test]
    fn failing_source_falls_back_to_compiled_file() {
        let err = error("x", "");
        assert_eq!(
            failing_source(&err, Path::new("test/sass/input/a.scss"), "input"),
            "test/sass/input/a.scss"
        );
    }

    #[test]
    fn grass_compiles_simple_scss() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.scss");
        fs::write(&file, "a {\n  color: red;\n}\n").unwrap();
        let css = SassCompiler.compile(&file).unwrap();
        assert!(css.contains("color: red"));
    }

    #[test]
    fn grass_reports_at_error_text_as_original() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.scss");
        fs::write(&file, "@error \"SPOT CSS: broken - details\";\n").unwrap();
        let err = SassCompiler.compile(&file).unwrap_err();
        assert!(err.message_original.contains("SPOT CSS: broken"));
    }
}
