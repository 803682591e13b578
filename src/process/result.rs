//! Execution result types.

use std::time::Duration;

/// Result of running a child process to completion.
#[derive(Debug, Clone, Default)]
pub struct ExecutionResult {
    /// Exit code (absent if the process was terminated by a signal).
    pub exit_code: Option<i32>,
    /// Captured standard output, when capture was requested.
    pub stdout: Option<String>,
    /// Wall-clock time from spawn to exit.
    pub duration: Duration,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(exit_code: Option<i32>, duration: Duration) -> Self {
        Self {
            exit_code,
            stdout: None,
            duration,
        }
    }

    /// Attach captured standard output.
    pub fn with_stdout(mut self, stdout: String) -> Self {
        self.stdout = Some(stdout);
        self
    }

    /// Check if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Captured output, or an empty string when nothing was captured.
    pub fn output(&self) -> &str {
        self.stdout.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let result = ExecutionResult::new(Some(0), Duration::from_millis(5));
        assert!(result.success());
        assert_eq!(result.output(), "");
    }

    #[test]
    fn test_failure_and_signal() {
        assert!(!ExecutionResult::new(Some(2), Duration::ZERO).success());
        assert!(!ExecutionResult::new(None, Duration::ZERO).success());
    }

    #[test]
    fn test_with_stdout() {
        let result = ExecutionResult::new(Some(0), Duration::ZERO).with_stdout("hello\n".into());
        assert_eq!(result.output(), "hello\n");
    }
}
