//! # Poll Metrics
//!
//! Metrics for consistency polling: attempts and outcomes.

use crate::observability::metrics::registry::REGISTRY;
use anyhow::Result;
use prometheus::{IntCounter, IntCounterVec};
use std::sync::LazyLock;

static POLL_ATTEMPTS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "aws_resource_poll_attempts_total",
        "Total number of fetches made while waiting for consistency",
    )
    .expect("Failed to create POLL_ATTEMPTS_TOTAL metric - this should never happen")
});

static POLL_OUTCOMES_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "aws_resource_poll_outcomes_total",
            "Total number of finished polls by outcome",
        ),
        &["outcome"],
    )
    .expect("Failed to create POLL_OUTCOMES_TOTAL metric - this should never happen")
});

pub(crate) fn register_poll_metrics() -> Result<()> {
    REGISTRY.register(Box::new(POLL_ATTEMPTS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(POLL_OUTCOMES_TOTAL.clone()))?;
    Ok(())
}

pub fn increment_poll_attempts() {
    POLL_ATTEMPTS_TOTAL.inc();
}

/// Record how a poll finished: `satisfied`, `timeout`, `cancelled` or `error`
pub fn record_poll_outcome(outcome: &str) {
    POLL_OUTCOMES_TOTAL.with_label_values(&[outcome]).inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_poll_attempts() {
        let before = POLL_ATTEMPTS_TOTAL.get();
        increment_poll_attempts();
        let after = POLL_ATTEMPTS_TOTAL.get();
        assert!(after > before);
    }

    #[test]
    fn test_record_poll_outcome() {
        let before = POLL_OUTCOMES_TOTAL.with_label_values(&["timeout"]).get();
        record_poll_outcome("timeout");
        let after = POLL_OUTCOMES_TOTAL.with_label_values(&["timeout"]).get();
        assert!(after > before);
    }
}
