//! Regression test harness for Sass style-sheet suites.
//!
//! A suite lives under one directory with three parallel roots: `input/`
//! (source `.sass`/`.scss` files), `expected-output/` (reference CSS, or a
//! captured framework diagnostic), and `generated-output/` (recreated from
//! scratch each run). The pipeline compiles every source file, checks that
//! every source has an expected counterpart, diffs generated against
//! expected, and prints an aggregated OK/Failed verdict.

pub use crate::error::HarnessError;

pub mod cli;
pub mod compiler;
pub mod config;
pub mod diff;
pub mod discovery;
pub mod error;
pub mod harness;
pub mod paths;
pub mod report;
pub mod watch;
