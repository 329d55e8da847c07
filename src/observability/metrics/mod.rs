//! # Metrics Module
//!
//! Prometheus metrics, organized by responsibility.
//!
//! ## Sub-modules
//!
//! - `registry` - Metrics registry setup and registration
//! - `poll_metrics` - Consistency polling attempts and outcomes
//! - `resource_metrics` - Resource handler operations

pub mod poll_metrics;
pub mod registry;
pub mod resource_metrics;

pub use poll_metrics::*;
pub use registry::*;
pub use resource_metrics::*;
