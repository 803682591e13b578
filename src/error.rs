//! Error types for ga4gh-common.

use std::time::Duration;

use thiserror::Error;

/// Main error type for ga4gh-common operations.
#[derive(Error, Debug)]
pub enum Ga4ghError {
    /// The program could not be located before spawning.
    #[error("can't find command while trying to run {command:?}")]
    ExecutableNotFound {
        command: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited with a non-zero status.
    #[error("command {command:?} returned non-zero exit status {}", display_code(.code))]
    CommandFailed {
        command: Vec<String>,
        /// Exit code, absent when the process was terminated by a signal.
        code: Option<i32>,
    },

    /// Spawning failed for a reason other than a missing program.
    #[error("failed to spawn {command:?}: {source}")]
    Spawn {
        command: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    /// The command line was empty or could not be tokenized.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// A wall-clock budget was exceeded.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Sequences passed to a strict zip had different lengths.
    #[error("list at index {index} has length {len} != {expected}")]
    LengthMismatch {
        index: usize,
        len: usize,
        expected: usize,
    },

    /// Test-fixture comparison failed.
    #[error("assertion failed: {0}")]
    AssertionFailure(String),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed configuration value.
    #[error("configuration error: {0}")]
    Config(String),
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "(terminated by signal)".to_string(),
    }
}

impl Ga4ghError {
    /// Exit code carried by a `CommandFailed` error.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { code, .. } => *code,
            _ => None,
        }
    }
}

/// Convenience Result type for ga4gh-common operations.
pub type Result<T> = std::result::Result<T, Ga4ghError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn command(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_executable_not_found_display() {
        let err = Ga4ghError::ExecutableNotFound {
            command: command(&["doesNotExist", "-x"]),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("can't find command"));
        assert!(err.to_string().contains("doesNotExist"));
    }

    #[test]
    fn test_command_failed_display() {
        let err = Ga4ghError::CommandFailed {
            command: command(&["ls", "-5"]),
            code: Some(2),
        };
        assert!(err.to_string().contains("non-zero exit status 2"));
        assert_eq!(err.exit_code(), Some(2));
    }

    #[test]
    fn test_command_failed_by_signal() {
        let err = Ga4ghError::CommandFailed {
            command: command(&["sleep", "100"]),
            code: None,
        };
        assert!(err.to_string().contains("signal"));
        assert_eq!(err.exit_code(), None);
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = Ga4ghError::LengthMismatch {
            index: 1,
            len: 3,
            expected: 2,
        };
        assert_eq!(err.to_string(), "list at index 1 has length 3 != 2");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Ga4ghError = io_err.into();
        assert!(matches!(err, Ga4ghError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_timeout_display() {
        let err = Ga4ghError::Timeout(Duration::from_secs(1));
        assert!(err.to_string().contains("timed out"));
    }
}
