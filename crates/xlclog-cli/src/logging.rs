//! Tracing setup
//!
//! Logs go to stderr so stdout carries only rendered records.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "XLCLOG_LOG";

fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }

    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber
pub fn init(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
