//! Log output for the docview binary
//!
//! Library code only emits `tracing` events; the binary installs a
//! subscriber writing to stderr so stdout stays clean for reports.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the computed filter.
pub const LOG_ENV: &str = "DOCVIEW_LOG";

/// Default filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "docview=warn",
        1 => "docview=debug",
        _ => "docview=trace",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
