//! ga4gh-run-tests binary entry point.

use std::process::ExitCode;

use ga4gh_common::cli::{self, parse_args};
use ga4gh_common::config::Config;
use ga4gh_common::{logging, CiReplayer};
use tracing::debug;

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("Try 'ga4gh-run-tests --help' for more information.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _ = logging::init_with_filter(config.log_filter());
    debug!(ci_file = %config.ci.file.display(), "configuration loaded");

    match CiReplayer::from_config(&config.ci).run_tests() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
