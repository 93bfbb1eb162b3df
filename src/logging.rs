//! Tracing initialization.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding an explicit `tracing` filter directive.
pub const LOG_ENV: &str = "CITT_LOG";

/// Install a stderr subscriber.
///
/// `CITT_LOG` (e.g. `CITT_LOG=citt_dispatch=debug`) wins when set and valid;
/// otherwise the level comes from `-v`/`-q`. Stdout is left for results.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)));
    // Fails only if a global subscriber is already installed, which is fine.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .try_init();
}

fn default_level(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    }
}
