//! Repeat-until-false polling.

use std::thread;
use std::time::Duration;

/// Default pause between repetitions.
pub const DEFAULT_SLEEP: Duration = Duration::from_millis(100);

/// Calls a function repeatedly, sleeping between calls, until it returns
/// `false`. Runs on, and blocks, the calling thread.
#[derive(Debug, Clone, Copy)]
pub struct Repeat {
    sleep: Duration,
}

impl Default for Repeat {
    fn default() -> Self {
        Self::new(DEFAULT_SLEEP)
    }
}

impl Repeat {
    /// Create a repeater with the given pause between calls.
    pub fn new(sleep: Duration) -> Self {
        Self { sleep }
    }

    /// Pause between calls.
    pub fn sleep(&self) -> Duration {
        self.sleep
    }

    /// Call `f` until it returns `false`; returns how many times it ran.
    pub fn run(&self, mut f: impl FnMut() -> bool) -> usize {
        let mut calls = 0;
        loop {
            calls += 1;
            if !f() {
                return calls;
            }
            thread::sleep(self.sleep);
        }
    }

    /// Like [`run`](Self::run), stopping at the first error.
    pub fn try_run<E>(&self, mut f: impl FnMut() -> Result<bool, E>) -> Result<usize, E> {
        let mut calls = 0;
        loop {
            calls += 1;
            if !f()? {
                return Ok(calls);
            }
            thread::sleep(self.sleep);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_repeats_until_false() {
        let mut list = Vec::new();
        let calls = Repeat::default().run(|| {
            list.push(1);
            list.len() < 3
        });
        assert_eq!(list, vec![1, 1, 1]);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_single_call_does_not_sleep() {
        let start = Instant::now();
        let calls = Repeat::new(Duration::from_secs(10)).run(|| false);
        assert_eq!(calls, 1);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_sleeps_between_calls() {
        let start = Instant::now();
        let mut remaining = 3;
        Repeat::new(Duration::from_millis(20)).run(|| {
            remaining -= 1;
            remaining > 0
        });
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn test_try_run_propagates_error() {
        let mut n = 0;
        let result: Result<usize, String> = Repeat::new(Duration::ZERO).try_run(|| {
            n += 1;
            if n == 2 {
                Err("poll failed".to_string())
            } else {
                Ok(true)
            }
        });
        assert_eq!(result.unwrap_err(), "poll failed");
        assert_eq!(n, 2);
    }

    #[test]
    fn test_default_sleep() {
        assert_eq!(Repeat::default().sleep(), DEFAULT_SLEEP);
    }
}
