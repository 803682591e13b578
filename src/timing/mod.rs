//! Call wrappers for timing, polling and deadlines.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use ga4gh_common::timing::{Repeat, Timed, Timeout};
//!
//! let total = Timed::with_label("sum").run(|| (1..=100).sum::<u32>());
//!
//! let mut polls = 0;
//! Repeat::new(Duration::from_millis(10)).run(|| {
//!     polls += 1;
//!     polls < 5
//! });
//!
//! let answer = Timeout::from_secs(1).run(move || total * 2).unwrap();
//! # let _ = answer;
//! ```

mod humanize;
mod repeat;
mod timed;
mod timeout;

pub use humanize::natural_delta;
pub use repeat::{Repeat, DEFAULT_SLEEP};
pub use timed::Timed;
pub use timeout::{CancelToken, Timeout, DEFAULT_TIMEOUT};
