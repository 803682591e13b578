//! External process utilities.
//!
//! This module provides:
//! - Executable lookup on the search path
//! - Synchronous command execution (inherited, silenced, or captured output)
//!
//! # Example
//!
//! ```no_run
//! use ga4gh_common::process::{find_executable, run_command, run_command_return_output};
//!
//! if find_executable("samtools").is_some() {
//!     run_command("samtools --version", true).unwrap();
//! }
//! let listing = run_command_return_output("ls -1").unwrap();
//! println!("{listing}");
//! ```

mod command;
mod executable;
mod executor;
mod result;

pub use command::Command;
pub use executable::{find_executable, find_executable_in, missing_executables, require_executables};
pub use executor::{
    run_command, run_command_return_output, run_command_splits, run_command_splits_return_output,
    CommandExecutor,
};
pub use result::ExecutionResult;
