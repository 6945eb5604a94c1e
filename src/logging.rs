//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence. Without it the level is `warn`, or `debug`
//! in verbose mode. Logs always go to stderr so JSON on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity setting
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "pydepgraph=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber; later calls are no-ops
pub fn initialize(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
