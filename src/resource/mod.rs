//! # Resource Handlers
//!
//! Create, read, update, delete and import for each managed resource.
//!
//! Handlers talk to AWS only through the provider traits and end every
//! mutation with a consistency poll, so a successful return means AWS reads
//! back what was written.

mod alternate_contact;
mod login_profile;
pub mod validation;

pub use alternate_contact::AlternateContactResource;
pub use login_profile::LoginProfileResource;

use std::time::Instant;

use crate::error::ResourceError;
use crate::observability::metrics;

fn record_operation<T>(
    resource: &str,
    result: &Result<T, ResourceError>,
    operation: &str,
    start: Instant,
) {
    metrics::record_resource_operation(
        resource,
        operation,
        result.is_ok(),
        start.elapsed().as_secs_f64(),
    );
}
