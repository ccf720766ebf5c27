//! Logging setup
//!
//! Structured logging with tracing.

use tracing_subscriber::EnvFilter;

/// Initialize logging, preferring RUST_LOG over the configured level
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
