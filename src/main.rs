mod cli;
mod logging;
mod render;

use crate::cli::Cli;
use citt_config::Config;
use citt_dispatch::{Dispatcher, Policy};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;

/// Every file digested.
const EXIT_SUCCESS: u8 = 0;
/// At least one file could not be digested.
const EXIT_FAILURE: u8 = 1;
/// The configuration could not be loaded. Matches clap's own usage errors.
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    ExitCode::from(run_with_stdio(cli).await)
}

/// Run against the process's standard streams.
///
/// The handles are left unlocked so each line takes the lock on its own; the
/// log subscriber on the worker threads writes to the same stderr.
async fn run_with_stdio(cli: Cli) -> u8 {
    run(cli, &mut std::io::stdout(), &mut std::io::stderr()).await
}

async fn run(cli: Cli, stdout: &mut impl Write, stderr: &mut impl Write) -> u8 {
    let config = match Config::load(&cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!(error = ?e, "Configuration failed");
            if let Err(write_err) = writeln!(stderr, "citt: {}", *e) {
                tracing::warn!(error = %write_err, "Could not write error");
            }
            return EXIT_USAGE;
        },
    };
    let dispatcher = Dispatcher::local()
        .with_parallelism(config.parallelism())
        .with_policy(config.policy);
    let report = dispatcher
        .run(cli.files, |outcome| {
            if let Err(e) = render::outcome(stdout, stderr, outcome) {
                tracing::warn!(path = %outcome.path.display(), error = %e, "Could not write result");
            }
        })
        .await;
    match report.into_result() {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Run failed");
            // Under collect-all every failure has already been printed.
            if dispatcher.policy() == Policy::FailFast
                && let Err(write_err) = render::failure(stderr, &e)
            {
                tracing::warn!(error = %write_err, "Could not write error");
            }
            EXIT_FAILURE
        },
    }
}
