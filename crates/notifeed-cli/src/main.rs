//! notifeed - notification feed generator
//!
//! Main entry point for the `notifeed` binary.

use std::process::ExitCode;

use clap::Parser;
use notifeed_cli::{run, Cli, CliError, Exit};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = notifeed_common_log::init(cli.log_config()) {
        eprintln!("{}", CliError::from(e).render());
        return Exit::GeneralError.into();
    }

    match run(&cli) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            eprintln!("{}", e.render());
            e.exit().into()
        }
    }
}
