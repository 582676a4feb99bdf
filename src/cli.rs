//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::config::SuiteConfig;
use crate::harness::Harness;
use crate::watch;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "stylecheck",
    version,
    about = "Regression test harness for Sass style-sheet suites."
)]
pub struct StylecheckArgs {
    /// Path to a suite config YAML file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the suite root directory.
    #[arg(long, global = true)]
    pub suite_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ArgsCommand,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum ArgsCommand {
    /// Full pipeline: clean, compile, check, diff, and report.
    Test {
        /// Exit with code 1 when the suite fails.
        #[arg(long)]
        strict: bool,
    },
    /// Run the full pipeline once, then re-run on every suite change.
    Watch,
    /// Promote generated output to be the new expected baseline.
    Sync,
}

/// The main entry point for the CLI.
pub fn run() {
    let args = StylecheckArgs::parse();

    let mut config = match &args.config {
        Some(path) => SuiteConfig::load(path).unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(2);
        }),
        None => SuiteConfig::default(),
    };
    if let Some(root) = args.suite_root {
        config.suite_root = root;
    }

    let harness = Harness::new(config);

    match args.command {
        ArgsCommand::Test { strict } => {
            let report = harness.run().unwrap_or_else(|e| {
                eprintln!("{e}");
                process::exit(2);
            });
            if strict && !report.is_ok() {
                process::exit(1);
            }
        }

        ArgsCommand::Watch => {
            if let Err(e) = watch::watch(&harness) {
                eprintln!("{e}");
                process::exit(2);
            }
        }

        ArgsCommand::Sync => {
            let copied = harness.sync().unwrap_or_else(|e| {
                eprintln!("{e}");
                process::exit(2);
            });
            println!("Synced {copied} files to the expected-output baseline");
        }
    }
}
