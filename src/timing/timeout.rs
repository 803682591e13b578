//! Deadline-bounded calls.
//!
//! The call runs on a worker thread while the caller waits with a deadline.
//! Cancellation is best-effort: when the deadline passes the caller gets
//! [`Ga4ghError::Timeout`] and the call's [`CancelToken`] is cancelled, but
//! the worker keeps running until the function itself returns. Every call
//! owns its own token, so timeouts on different threads are independent.

use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::warn;

use crate::error::Ga4ghError;
use crate::Result;

/// Default budget for a single call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Cooperative cancellation flag shared between the caller and the worker.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create an uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the work to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether the deadline has passed.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Runs a function with a wall-clock budget.
#[derive(Debug, Clone, Copy)]
pub struct Timeout {
    budget: Duration,
}

impl Default for Timeout {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Timeout {
    /// Create a timeout with the given budget.
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }

    /// Create a timeout of `secs` seconds.
    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// The configured budget.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Run `f`, failing with `Timeout` if it has not returned in time.
    pub fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        self.run_cancellable(move |_| f())
    }

    /// Run `f` with a token that is cancelled once the budget expires.
    ///
    /// A panic in `f` is resumed on the calling thread.
    pub fn run_cancellable<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&CancelToken) -> T + Send + 'static,
        T: Send + 'static,
    {
        let token = CancelToken::new();
        let worker_token = token.clone();
        let (tx, rx) = mpsc::sync_channel(1);

        let handle = thread::Builder::new()
            .name("ga4gh-timeout".into())
            .spawn(move || {
                // The receiver is gone if the caller already timed out.
                let _ = tx.send(f(&worker_token));
            })?;

        match rx.recv_timeout(self.budget) {
            Ok(value) => {
                let _ = handle.join();
                Ok(value)
            }
            Err(RecvTimeoutError::Timeout) => {
                token.cancel();
                warn!(budget = ?self.budget, "call exceeded its time budget");
                Err(Ga4ghError::Timeout(self.budget))
            }
            Err(RecvTimeoutError::Disconnected) => match handle.join() {
                Err(payload) => panic::resume_unwind(payload),
                Ok(()) => Err(Ga4ghError::Timeout(self.budget)),
            },
        }
    }
}
