//! Diagnostic logging setup
//!
//! Diagnostics go to stderr through `tracing`. `MCSETUP_LOG` takes any
//! `EnvFilter` directive; without it only warnings are shown, or debug output
//! with `--verbose`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "MCSETUP_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "mcsetup=debug" } else { "mcsetup=warn" }
}

/// Build the filter from the environment, falling back to the default level
pub fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
