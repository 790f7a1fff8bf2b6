//! Diagnostic logging setup
//!
//! Logs go to stderr through `tracing-subscriber`. `RUST_LOG` takes
//! precedence over the level chosen from the CLI flags.

use tracing_subscriber::EnvFilter;

/// Default filter when neither `--verbose` nor `RUST_LOG` is given
const DEFAULT_FILTER: &str = "pincheck=warn";

/// Filter used with `--verbose`
const VERBOSE_FILTER: &str = "pincheck=debug";

/// Pick the filter directive for the given verbosity
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Install the global subscriber; calling it twice is a no-op
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
