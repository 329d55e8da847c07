//! # Metrics Registry
//!
//! Prometheus metrics registry setup and registration.

use anyhow::Result;
use prometheus::{Encoder, Registry, TextEncoder};
use std::sync::LazyLock;

/// Global Prometheus metrics registry
pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Register all metrics with the Prometheus registry
///
/// Prometheus `Registry::register()` takes ownership (`Box<dyn Collector>`),
/// so the metrics are cloned. They are `Arc`-backed, so the clones share state.
#[allow(
    clippy::missing_errors_doc,
    reason = "Error documentation is provided in doc comments"
)]
pub fn register_metrics() -> Result<()> {
    super::poll_metrics::register_poll_metrics()?;
    super::resource_metrics::register_resource_metrics()?;
    Ok(())
}

/// Render every registered metric in the Prometheus text format
#[allow(
    clippy::missing_errors_doc,
    reason = "Error documentation is provided in doc comments"
)]
pub fn gather_metrics() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_metrics_are_gathered() {
        register_metrics().unwrap();
        super::super::increment_poll_attempts();

        let rendered = gather_metrics().unwrap();
        assert!(rendered.contains("aws_resource_poll_attempts_total"));
        // Registering twice is rejected
        assert!(register_metrics().is_err());
    }
}
