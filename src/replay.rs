//! Replays the `script` entries of a CI configuration file locally.

use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::{debug, info};

use crate::config::CiSection;
use crate::error::Ga4ghError;
use crate::fs::get_yaml_document;
use crate::logging::log;
use crate::process::run_command;
use crate::Result;

/// Emulates a CI run by executing each `script` command in order.
#[derive(Debug, Clone)]
pub struct CiReplayer {
    file: PathBuf,
    log_prefix: String,
    silent: bool,
}

impl Default for CiReplayer {
    fn default() -> Self {
        Self::from_config(&CiSection::default())
    }
}

impl CiReplayer {
    /// Create a replayer for the given CI file with default settings.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// Create a replayer from the `ci` configuration section.
    pub fn from_config(config: &CiSection) -> Self {
        Self {
            file: config.file.clone(),
            log_prefix: config.log_prefix.clone(),
            silent: config.silent,
        }
    }

    /// Set whether replayed commands' output is discarded.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// The CI file being replayed.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Read the CI file's `script` entry.
    ///
    /// Accepts a list of commands or a single command string.
    pub fn parse_test_commands(&self) -> Result<Vec<String>> {
        let doc = get_yaml_document(&self.file)?;
        let script = doc.get("script").ok_or_else(|| {
            Ga4ghError::Config(format!("no 'script' entry in {}", self.file.display()))
        })?;

        match script {
            Value::String(command) => Ok(vec![command.clone()]),
            Value::Sequence(entries) => entries
                .iter()
                .map(|entry| {
                    entry.as_str().map(str::to_string).ok_or_else(|| {
                        Ga4ghError::Config(format!("non-string script entry: {entry:?}"))
                    })
                })
                .collect(),
            other => Err(Ga4ghError::Config(format!(
                "'script' must be a string or a list, found {other:?}"
            ))),
        }
    }

    /// Run every test command; the first failure stops the run.
    pub fn run_tests(&self) -> Result<()> {
        let commands = self.parse_test_commands()?;
        debug!(file = %self.file.display(), count = commands.len(), "replaying CI script");

        for command in &commands {
            self.log(&format!("Running: \"{command}\""));
            run_command(command, self.silent)?;
        }

        info!(count = commands.len(), "all CI commands succeeded");
        self.log("SUCCESS");
        Ok(())
    }

    fn log(&self, message: &str) {
        log(format!("{} {}", self.log_prefix, message));
    }
}
