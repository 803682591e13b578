//! # ga4gh-common
//!
//! Utilities shared across GA4GH tooling projects.
//!
//! ## Features
//!
//! - **Processes**: executable lookup, synchronous command execution with
//!   inherited, silenced or captured output
//! - **Output**: OS-level capture and suppression of stdout/stderr with scoped guards
//! - **Timing**: timed, repeat-until-false and deadline-bounded calls
//! - **Filesystem**: pattern-based tree scans, touch, fixture comparison, YAML
//! - **CI replay**: run the `script` entries of a CI file locally
//!
//! ## Quick Start
//!
//! ```no_run
//! use ga4gh_common::process::{require_executables, run_command};
//! use ga4gh_common::timing::Timed;
//!
//! fn main() -> ga4gh_common::Result<()> {
//!     ga4gh_common::logging::try_init().ok();
//!
//!     require_executables(["samtools", "bgzip"]);
//!     Timed::with_label("compress").run(|| run_command("bgzip -f calls.vcf", false))?;
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod output;
pub mod process;
pub mod replay;
pub mod sequence;
pub mod timing;

// Re-export commonly used types
pub use error::{Ga4ghError, Result};
pub use output::{capture_output, suppress_output, suppressed, CaptureGuard, SuppressGuard};
pub use process::{
    find_executable, require_executables, run_command, run_command_return_output,
    run_command_splits, Command, CommandExecutor, ExecutionResult,
};
pub use replay::CiReplayer;
pub use sequence::{powerset, zip_lists};
pub use timing::{CancelToken, Repeat, Timed, Timeout};
