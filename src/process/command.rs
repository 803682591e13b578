//! Command building and representation.

use crate::error::Ga4ghError;
use crate::Result;

/// A command to be run as a child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Program name followed by its arguments.
    pub tokens: Vec<String>,
    /// Discard the child's stdout and stderr instead of inheriting them.
    pub silent: bool,
    /// Capture the child's stdout and return it in the result.
    pub capture_output: bool,
}

impl Command {
    /// Create a command from already-split tokens.
    pub fn from_splits<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            silent: false,
            capture_output: false,
        }
    }

    /// Tokenize a shell-syntax command line using POSIX quoting rules.
    ///
    /// Fails with `InvalidCommand` on unbalanced quotes or a line that
    /// contains no tokens.
    pub fn parse(command_line: &str) -> Result<Self> {
        let tokens = shlex::split(command_line).ok_or_else(|| {
            Ga4ghError::InvalidCommand(format!("unbalanced quoting in '{command_line}'"))
        })?;
        if tokens.is_empty() {
            return Err(Ga4ghError::InvalidCommand("empty command line".into()));
        }
        Ok(Self::from_splits(tokens))
    }

    /// Set whether the child's output is discarded.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Set whether the child's stdout is captured.
    pub fn capture_output(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }

    /// The program to run.
    pub fn program(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    /// Arguments following the program name.
    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let quoted: Vec<_> = self
            .tokens
            .iter()
            .map(|t| shlex::try_quote(t).unwrap_or_else(|_| t.as_str().into()))
            .collect();
        write!(f, "{}", quoted.join(" "))
    }
}
