//! Continuous mode: re-run the pipeline whenever the suite changes.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{RecursiveMode, Watcher};

use crate::error::HarnessError;
use crate::harness::Harness;

/// Quiet window used to coalesce bursts of filesystem events into one run.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Runs the pipeline once, then again on every change under the source or
/// expected-output roots. Blocks until the process is interrupted.
pub fn watch(harness: &Harness) -> Result<(), HarnessError> {
    harness.run()?;

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx)?;

    let config = harness.config();
    for root in [config.source_root(), config.expected_root()] {
        if root.exists() {
            watcher.watch(&root, RecursiveMode::Recursive)?;
        }
    }

    eprintln!("watching for changes (press Ctrl+C to stop)...");

    let mut pending = false;
    let mut last_event = Instant::now();
    loop {
        match rx.recv_timeout(DEBOUNCE) {
            Ok(Ok(_event)) => {
                pending = true;
                last_event = Instant::now();
            }
            Ok(Err(e)) => {
                eprintln!("watch error: {e}");
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if pending && last_event.elapsed() >= DEBOUNCE {
                    pending = false;
                    harness.run()?;
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
        }
    }
}
