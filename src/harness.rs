//! Pipeline orchestrator: clean, compile, existence-check, diff, status.
//!
//! Stages run strictly in sequence; within a stage, files are processed one
//! at a time in sorted order. No per-file failure crosses a stage boundary:
//! everything folds into the [`RunReport`] and the run continues with the
//! next independent unit of work.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::compiler::{Compiler, CompilerAdapter, SassCompiler};
use crate::config::SuiteConfig;
use crate::diff::{print_diff, DiffResult};
use crate::discovery;
use crate::error::HarnessError;
use crate::paths;
use crate::report::RunReport;

pub struct Harness {
    config: SuiteConfig,
    compiler: Box<dyn Compiler>,
}

impl Harness {
    /// Harness over the production Sass compiler.
    pub fn new(config: SuiteConfig) -> Self {
        Self::with_compiler(config, Box::new(SassCompiler))
    }

    /// Harness over a caller-provided compiler.
    pub fn with_compiler(config: SuiteConfig, compiler: Box<dyn Compiler>) -> Self {
        Self { config, compiler }
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// One full pipeline run; returns the aggregated report.
    pub fn run(&self) -> Result<RunReport, HarnessError> {
        let mut report = RunReport::new();

        self.clean()?;

        let sources = discovery::discover_source_files(&self.config)?;
        let adapter = CompilerAdapter::new(&self.config, self.compiler.as_ref());
        for source in &sources {
            adapter.compile_file(source, &mut report)?;
        }

        self.check_expected_files(&sources, &mut report);
        self.diff_generated(&mut report)?;

        report.print_status(&self.config);
        Ok(report)
    }

    /// Deletes and recreates the generated root so no stale output survives
    /// between runs.
    fn clean(&self) -> Result<(), HarnessError> {
        let root = self.config.generated_root();
        match fs::remove_dir_all(&root) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(HarnessError::io(&root, e)),
        }
        fs::create_dir_all(&root).map_err(|e| HarnessError::io(&root, e))
    }

    /// Asserts an expected-output file exists for every source file. Each
    /// missing one is its own failure; the scan never short-circuits.
    fn check_expected_files(&self, sources: &[PathBuf], report: &mut RunReport) {
        for source in sources {
            let expected = self.expected_for_source(source);
            if !expected.exists() {
                report.fail(
                    &self.config,
                    Some(&format!(
                        "Missing file in {}\nas an expected output to input file {}",
                        expected.display(),
                        source.display()
                    )),
                );
            }
        }
    }

    /// Diffs every generated file against its expected counterpart. A
    /// missing expected file is skipped here: the existence check already
    /// reported it, re-raising would double-report.
    fn diff_generated(&self, report: &mut RunReport) -> Result<(), HarnessError> {
        for generated in discovery::discover_generated_files(&self.config)? {
            let expected = self.expected_for_generated(&generated);

            let expected_text = match fs::read_to_string(&expected) {
                Ok(text) => text,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(HarnessError::io(&expected, e)),
            };
            let generated_text =
                fs::read_to_string(&generated).map_err(|e| HarnessError::io(&generated, e))?;

            let result =
                DiffResult::compute(generated, expected, &expected_text, &generated_text);
            if !result.is_clean() {
                report.fail(&self.config, None);
                print_diff(&result, &self.config);
            }
        }
        Ok(())
    }

    /// Promotes every generated file to be the new expected baseline.
    /// Returns the number of files copied.
    pub fn sync(&self) -> Result<usize, HarnessError> {
        let mut copied = 0;
        for generated in discovery::discover_generated_files(&self.config)? {
            let expected = self.expected_for_generated(&generated);
            if let Some(parent) = expected.parent() {
                fs::create_dir_all(parent).map_err(|e| HarnessError::io(parent, e))?;
            }
            fs::copy(&generated, &expected).map_err(|e| HarnessError::io(&expected, e))?;
            copied += 1;
        }
        Ok(copied)
    }

    fn expected_for_source(&self, source: &Path) -> PathBuf {
        let rebased = paths::rebase(
            &source.to_string_lossy(),
            &self.config.source_dir,
            &self.config.expected_dir,
        );
        PathBuf::from(paths::swap_extension(&rebased, &self.config.output_extension))
    }

    fn expected_for_generated(&self, generated: &Path) -> PathBuf {
        PathBuf::from(paths::rebase(
            &generated.to_string_lossy(),
            &self.config.generated_dir,
            &self.config.expected_dir,
        ))
    }
}
