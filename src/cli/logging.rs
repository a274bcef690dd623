//! Tracing subscriber setup for the binary

use tracing_subscriber::EnvFilter;

use crate::domain::config::DEFAULT_LOG_LEVEL;

/// Check whether `directive` is a valid tracing filter
pub fn is_valid_filter(directive: &str) -> bool {
    EnvFilter::try_new(directive).is_ok()
}

/// Install a stderr `fmt` subscriber filtered by `directive`.
///
/// An invalid directive falls back to the default level. Calling this twice
/// keeps the first subscriber.
pub fn init_logging(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
