//! notifeed CLI library.
//!
//! The binary is a thin wrapper around [`run`].

pub mod cli;
pub mod error;

use notifeed_spec::FeedGenerator;
use tracing::{debug, info};

pub use cli::Cli;
pub use error::{CliError, Exit};

/// Execute a parsed command line. Logging must already be initialized.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    let project = cli.project_dir()?;
    let config = cli.load_config(&project)?;
    debug!(project = %project.display(), ?config, "configuration loaded");

    let generator = FeedGenerator::new(config, &project);

    if cli.check {
        let outcome = generator.collect()?;
        let total = outcome.entries.len() + outcome.skipped.len();
        if !outcome.skipped.is_empty() {
            return Err(CliError::Check {
                skipped: outcome.skipped.len(),
                total,
            });
        }
        if !cli.quiet {
            println!("{} notifications ok", outcome.entries.len());
        }
        return Ok(());
    }

    let report = generator.run()?;
    info!(
        output = %report.output.display(),
        replaced = report.replaced,
        "feed written"
    );
    if !cli.quiet {
        println!(
            "{} notifications written to {} ({} skipped)",
            report.written,
            report.output.display(),
            report.skipped
        );
    }
    Ok(())
}
