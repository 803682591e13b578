//! Output capture and suppression.
//!
//! - [`capture_output`] collects everything a function writes to the real
//!   stdout/stderr descriptors, child processes included.
//! - [`suppress_output`] silences those descriptors until the returned
//!   guard is dropped.
//!
//! Both work at the file-descriptor level and affect the whole process.

mod capture;
#[cfg(unix)]
mod fd;
mod suppress;

pub use capture::{capture_output, CaptureGuard};
pub use suppress::{suppress_output, suppressed, SuppressGuard};
