//! Wall-clock timing of a call.

use std::cell::Cell;
use std::time::{Duration, Instant};

use tracing::debug;

use super::humanize::natural_delta;
use crate::logging;

/// Times each call it runs and prints the elapsed time when the call returns.
#[derive(Debug, Default)]
pub struct Timed {
    label: Option<String>,
    last: Cell<Option<Duration>>,
}

impl Timed {
    /// Create an unlabelled timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix the report with `label`.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            last: Cell::new(None),
        }
    }

    /// Run `f`, then print how long it took on stdout.
    ///
    /// The report does not depend on a tracing subscriber being installed.
    /// A panic in `f` unwinds before anything is reported.
    pub fn run<T>(&self, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();
        self.last.set(Some(elapsed));
        debug!(elapsed_ms = elapsed.as_millis() as u64, "timed call finished");
        logging::log(self.report(elapsed));
        result
    }

    /// Duration of the most recent completed call.
    pub fn last_elapsed(&self) -> Option<Duration> {
        self.last.get()
    }

    /// The report line for `elapsed`.
    pub fn report(&self, elapsed: Duration) -> String {
        let line = format!(
            "Finished in {} ({:.2} seconds)",
            natural_delta(elapsed),
            elapsed.as_secs_f64()
        );
        match &self.label {
            Some(label) => format!("{label}: {line}"),
            None => line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_returns_result_and_records() {
        let timed = Timed::new();
        assert!(timed.last_elapsed().is_none());

        let mut calls = Vec::new();
        let value = timed.run(|| {
            calls.push(1);
            "done"
        });

        assert_eq!(value, "done");
        assert_eq!(calls, vec![1]);
        assert!(timed.last_elapsed().is_some());
    }

    #[test]
    fn test_report_format() {
        let timed = Timed::new();
        assert_eq!(
            timed.report(Duration::from_millis(1500)),
            "Finished in a second (1.50 seconds)"
        );
    }

    #[test]
    fn test_labelled_report() {
        let timed = Timed::with_label("index build");
        let report = timed.report(Duration::from_secs(120));
        assert_eq!(report, "index build: Finished in 2 minutes (120.00 seconds)");
    }

    #[test]
    fn test_panic_skips_report() {
        let timed = Timed::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            timed.run(|| panic!("fails before report"))
        }));
        assert!(result.is_err());
        assert!(timed.last_elapsed().is_none());
    }
}
