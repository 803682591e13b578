//! Synchronous command execution.

use std::io::ErrorKind;
use std::process::{Command as StdCommand, Stdio};
use std::time::Instant;

use tracing::{debug, warn};

use super::command::Command;
use super::result::ExecutionResult;
use crate::error::Ga4ghError;
use crate::Result;

/// Runs [`Command`]s to completion on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandExecutor;

impl CommandExecutor {
    /// Create a new command executor.
    pub fn new() -> Self {
        Self
    }

    /// Spawn the command, wait for it, and fail on a non-zero exit.
    ///
    /// Stdout is discarded when `silent` is set, captured when
    /// `capture_output` is set, and inherited otherwise. Stderr is
    /// discarded when `silent` is set and inherited otherwise.
    pub fn execute(&self, command: &Command) -> Result<ExecutionResult> {
        let program = command
            .program()
            .ok_or_else(|| Ga4ghError::InvalidCommand("empty command".into()))?;

        debug!(command = %command, silent = command.silent, "running command");

        let mut child = StdCommand::new(program);
        child.args(command.args());

        let stdout = if command.capture_output {
            Stdio::piped()
        } else if command.silent {
            Stdio::null()
        } else {
            Stdio::inherit()
        };
        let stderr = if command.silent {
            Stdio::null()
        } else {
            Stdio::inherit()
        };
        child.stdout(stdout).stderr(stderr).stdin(Stdio::inherit());

        let start = Instant::now();
        let output = child
            .output()
            .map_err(|source| spawn_error(command, source))?;
        let duration = start.elapsed();

        let exit_code = output.status.code();
        if !output.status.success() {
            warn!(command = %command, code = ?exit_code, "command failed");
            return Err(Ga4ghError::CommandFailed {
                command: command.tokens.clone(),
                code: exit_code,
            });
        }

        debug!(command = %command, elapsed = ?duration, "command finished");

        let mut result = ExecutionResult::new(exit_code, duration);
        if command.capture_output {
            result = result.with_stdout(String::from_utf8_lossy(&output.stdout).into_owned());
        }
        Ok(result)
    }
}

/// `NotFound` from spawn means the program itself could not be located;
/// every other kind is reported as a generic spawn failure.
fn spawn_error(command: &Command, source: std::io::Error) -> Ga4ghError {
    let command = command.tokens.clone();
    if source.kind() == ErrorKind::NotFound {
        Ga4ghError::ExecutableNotFound { command, source }
    } else {
        Ga4ghError::Spawn { command, source }
    }
}

/// Run a shell-syntax command line, inheriting or discarding its output.
pub fn run_command(command_line: &str, silent: bool) -> Result<()> {
    let command = Command::parse(command_line)?.silent(silent);
    CommandExecutor::new().execute(&command).map(|_| ())
}

/// Run a command given its already-split tokens.
pub fn run_command_splits<I, S>(tokens: I, silent: bool) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let command = Command::from_splits(tokens).silent(silent);
    CommandExecutor::new().execute(&command).map(|_| ())
}

/// Run a shell-syntax command line and return its standard output.
pub fn run_command_return_output(command_line: &str) -> Result<String> {
    let command = Command::parse(command_line)?.capture_output(true);
    capture(&command)
}

/// Run already-split tokens and return the command's standard output.
pub fn run_command_splits_return_output<I, S>(tokens: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    capture(&Command::from_splits(tokens).capture_output(true))
}

fn capture(command: &Command) -> Result<String> {
    let result = CommandExecutor::new().execute(command)?;
    Ok(result.stdout.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_COMMAND: &str = "echo -n";
    const INVALID_COMMAND: &str = "ls -5";
    const NONEXISTENT: &str = "doesNotExistAsAnExecutable";

    #[test]
    fn test_run_command() {
        run_command(VALID_COMMAND, false).unwrap();

        let err = run_command(INVALID_COMMAND, true).unwrap_err();
        assert!(matches!(err, Ga4ghError::CommandFailed { .. }));
        assert!(err.exit_code().is_some_and(|c| c != 0));

        let err = run_command(NONEXISTENT, true).unwrap_err();
        assert!(matches!(err, Ga4ghError::ExecutableNotFound { .. }));
        assert!(err.to_string().contains(NONEXISTENT));
    }

    #[test]
    fn test_run_command_splits() {
        run_command_splits(VALID_COMMAND.split_whitespace(), false).unwrap();

        let err = run_command_splits(["ls", "-5"], true).unwrap_err();
        assert!(matches!(err, Ga4ghError::CommandFailed { .. }));

        let err = run_command_splits([NONEXISTENT], true).unwrap_err();
        assert!(matches!(err, Ga4ghError::ExecutableNotFound { .. }));
    }

    #[test]
    fn test_run_command_return_output() {
        let output = run_command_return_output("echo hello world").unwrap();
        assert_eq!(output, "hello world\n");

        let output = run_command_splits_return_output(["printf", "%s", "a b"]).unwrap();
        assert_eq!(output, "a b");
    }

    #[test]
    fn test_return_output_still_fails_on_nonzero() {
        let err = run_command_return_output("sh -c 'exit 3'").unwrap_err();
        assert_eq!(err.exit_code(), Some(3));
    }

    #[test]
    fn test_execute_empty_command() {
        let cmd = Command::from_splits(Vec::<String>::new());
        let result = CommandExecutor::new().execute(&cmd);
        assert!(matches!(result, Err(Ga4ghError::InvalidCommand(_))));
    }

    #[test]
    fn test_execute_reports_exit_code() {
        let cmd = Command::from_splits(["true"]);
        let result = CommandExecutor::new().execute(&cmd).unwrap();
        assert!(result.success());
        assert!(result.stdout.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_permission_denied_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("not-executable.sh");
        std::fs::write(&script, "#!/bin/sh\nexit 0\n").unwrap();

        let err = run_command_splits([script.to_string_lossy().into_owned()], true).unwrap_err();
        // No execute bit: denied even for root.
        assert!(matches!(err, Ga4ghError::Spawn { .. }));
    }
}
