//! # Resource Metrics
//!
//! Metrics for resource handler operations (create, read, update, delete).

use crate::observability::metrics::registry::REGISTRY;
use anyhow::Result;
use prometheus::{HistogramVec, IntCounterVec};
use std::sync::LazyLock;

static RESOURCE_OPERATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "aws_resource_operations_total",
            "Total number of resource operations",
        ),
        &["resource", "operation", "result"],
    )
    .expect("Failed to create RESOURCE_OPERATIONS_TOTAL metric - this should never happen")
});

static RESOURCE_OPERATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "aws_resource_operation_duration_seconds",
            "Duration of resource operations in seconds, including consistency waits",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 300.0]),
        &["resource", "operation"],
    )
    .expect("Failed to create RESOURCE_OPERATION_DURATION metric - this should never happen")
});

pub(crate) fn register_resource_metrics() -> Result<()> {
    REGISTRY.register(Box::new(RESOURCE_OPERATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(RESOURCE_OPERATION_DURATION.clone()))?;
    Ok(())
}

/// Record a finished resource operation
pub fn record_resource_operation(resource: &str, operation: &str, success: bool, duration: f64) {
    let result = if success { "success" } else { "error" };
    RESOURCE_OPERATIONS_TOTAL
        .with_label_values(&[resource, operation, result])
        .inc();
    RESOURCE_OPERATION_DURATION
        .with_label_values(&[resource, operation])
        .observe(duration);
}
