//! Command-line interface for ga4gh-run-tests.
//!
//! Uses lexopt for minimal binary size overhead, and a small help renderer
//! that lists flags and subcommands alphabetically.

use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Path to a JSON configuration file.
    pub config: Option<PathBuf>,
    /// CI configuration file to replay (overrides config).
    pub ci_file: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Discard the replayed commands' output.
    pub quiet: bool,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('f') | Long("ci-file") => {
                result.ci_file = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Short('q') | Long("quiet") => {
                result.quiet = true;
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// The version line printed by `--version`.
pub fn version_string() -> String {
    format!("GA4GH Runtests Version {}", env!("CARGO_PKG_VERSION"))
}

/// The runner's help text.
pub fn help_text() -> String {
    HelpFormatter::new("runs tests for a ga4gh package")
        .usage("ga4gh-run-tests [OPTIONS]")
        .option(&["-V", "--version"], None, "Print version")
        .option(&["-h", "--help"], None, "Print help")
        .option(&["-q", "--quiet"], None, "Discard the output of replayed commands")
        .option(&["-l", "--log-level"], Some("LVL"), "Log level (error, warn, info, debug, trace)")
        .option(&["-f", "--ci-file"], Some("FILE"), "CI file to replay [default: .travis.yml]")
        .option(&["-c", "--config"], Some("FILE"), "Path to configuration file (JSON)")
        .render()
}

/// Print help message.
pub fn print_help() {
    print!("{}", help_text());
}

/// Print version.
pub fn print_version() {
    println!("{}", version_string());
}

#[derive(Debug, Clone)]
struct HelpOption {
    flags: Vec<String>,
    value: Option<String>,
    help: String,
}

impl HelpOption {
    fn label(&self) -> String {
        let flags = self.flags.join(", ");
        match &self.value {
            Some(value) => format!("{flags} <{value}>"),
            None => flags,
        }
    }
}

/// Renders help text with flags and subcommands in alphabetical order.
#[derive(Debug, Clone, Default)]
pub struct HelpFormatter {
    description: String,
    usage: Option<String>,
    options: Vec<HelpOption>,
    subcommands: Vec<(String, String)>,
}

impl HelpFormatter {
    /// Start a help page with a one-line description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    /// Set the usage line.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Add an option with its flag spellings and optional value name.
    pub fn option(mut self, flags: &[&str], value: Option<&str>, help: impl Into<String>) -> Self {
        self.options.push(HelpOption {
            flags: flags.iter().map(|f| f.to_string()).collect(),
            value: value.map(str::to_string),
            help: help.into(),
        });
        self
    }

    /// Add a subcommand whose help line is its description.
    pub fn subcommand(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.subcommands.push((name.into(), description.into()));
        self
    }

    /// Render the help page.
    pub fn render(&self) -> String {
        let mut out = format!("{}\n", self.description);

        if let Some(usage) = &self.usage {
            out.push_str(&format!("\nUSAGE:\n    {usage}\n"));
        }

        if !self.options.is_empty() {
            let mut options = self.options.clone();
            options.sort_by(|a, b| a.flags.cmp(&b.flags));
            let rows: Vec<_> = options.iter().map(|o| (o.label(), o.help.as_str())).collect();
            out.push_str("\nOPTIONS:\n");
            push_rows(&mut out, &rows);
        }

        if !self.subcommands.is_empty() {
            let mut subcommands = self.subcommands.clone();
            subcommands.sort();
            let rows: Vec<_> = subcommands
                .iter()
                .map(|(name, desc)| (name.clone(), desc.as_str()))
                .collect();
            out.push_str("\nSUBCOMMANDS:\n");
            push_rows(&mut out, &rows);
        }

        out
    }
}

fn push_rows(out: &mut String, rows: &[(String, &str)]) {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, help) in rows {
        out.push_str(&format!("    {label:<width$}   {help}\n"));
    }
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
