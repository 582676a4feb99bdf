//! Pass/fail accumulation and final status output.

use crate::config::{SuiteConfig, GREEN, RED};

/// Accumulated verdict for one pipeline run.
///
/// Threaded explicitly through the stages: any stage that detects a
/// discrepancy flips the report to failed, nothing ever flips it back. The
/// red banner is printed with the first failure message; the final status
/// line repeats it only if no stage printed it yet.
#[derive(Debug, Default)]
pub struct RunReport {
    failures: usize,
    banner_printed: bool,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ok(&self) -> bool {
        self.failures == 0
    }

    /// Number of recorded discrepancies across all stages.
    pub fn failure_count(&self) -> usize {
        self.failures
    }

    /// Record a failure. With a message, prints the red banner followed by
    /// the message; without one, only flips the flag (the caller renders its
    /// own block, e.g. a diff).
    pub fn fail(&mut self, config: &SuiteConfig, message: Option<&str>) {
        self.failures += 1;
        if let Some(message) = message {
            println!("{}", config.colorize("Failed!", RED));
            self.banner_printed = true;
            println!("{message}");
        }
    }

    /// Print the final aggregated OK/Failed line.
    pub fn print_status(&self, config: &SuiteConfig) {
        if self.is_ok() {
            println!("{}", config.colorize("OK", GREEN));
        } else if !self.banner_printed {
            println!("{}", config.colorize("Failed!", RED));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_clean() {
        assert!(RunReport::new().is_ok());
    }

    #[test]
    fn failure_is_sticky() {
        let config = SuiteConfig { use_colors: false, ..SuiteConfig::default() };
        let mut report = RunReport::new();
        report.fail(&config, None);
        report.fail(&config, Some("missing file"));
        assert!(!report.is_ok());
        assert_eq!(report.failure_count(), 2);
    }
}
