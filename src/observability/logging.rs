//! # Logging
//!
//! `tracing` subscriber setup for the binary.

use tracing::warn;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; `default_filter` is used when it is unset or invalid.
/// Calling this twice keeps the first subscriber.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!("Tracing subscriber already initialized: {}", e);
    }
}
