//! Tracing setup shared by the binaries.
//!
//! Logs go to stderr so stdout stays clean for NDJSON output. The filter comes
//! from `SHOWCASE_LOG` (any `EnvFilter` directive) and defaults to `warn`;
//! `--verbose` on the CLIs bumps the crate to `debug`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SHOWCASE_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Build the filter the binaries install.
pub fn env_filter(verbose: bool) -> EnvFilter {
    let mut filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    if verbose {
        if let Ok(directive) = "showcase_filter=debug".parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
