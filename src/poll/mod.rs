//! # Consistency Polling
//!
//! Repeatedly fetch a remote resource until a [`Condition`] holds, the deadline
//! passes, or the caller cancels.
//!
//! AWS control planes are eventually consistent: a contact that was just written
//! may read back as missing or stale for a few seconds, and a deleted one may
//! still be visible. Every handler operation that changes remote state ends
//! with one of these polls.
//!
//! Delays grow exponentially from `min_delay` to `max_delay` (`backon`), with
//! optional jitter. Both the fetch and the sleep race the deadline and the
//! cancellation token, so a hung request cannot outlive the timeout.

pub mod condition;

use backon::{BackoffBuilder, ExponentialBuilder};
use std::future::Future;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub use condition::{from_fn, Condition, Decision, FnCondition, UntilFound, UntilMatch, UntilNotFound};

use crate::config::PollConfig;
use crate::error::ResourceError;
use crate::observability::metrics;

/// Fetch until `condition` is satisfied.
///
/// # Returns
/// * `Ok(Some(value))` - the condition was satisfied by a successful fetch
/// * `Ok(None)` - the condition was satisfied by an error result (e.g. not found after a delete)
/// * `Err(ResourceError::Timeout)` - `config.timeout` elapsed first
/// * `Err(ResourceError::Cancelled)` - `cancel` fired first
/// * `Err(e)` - the condition stopped on a fetch error, or aborted with its own error
///
/// # Example
/// ```ignore
/// let contact = poll_until(
///     &config.poll.with_timeout(Duration::from_secs(300)),
///     Some(&cancel),
///     || api.get_alternate_contact(account_id.as_deref(), contact_type),
///     UntilFound::new(2),
///     "alternate contact BILLING",
/// )
/// .await?;
/// ```
pub async fn poll_until<T, F, Fut, C>(
    config: &PollConfig,
    cancel: Option<&CancellationToken>,
    mut fetch: F,
    mut condition: C,
    resource_name: &str,
) -> Result<Option<T>, ResourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ResourceError>>,
    C: Condition<T>,
{
    let start = Instant::now();
    let deadline = start + config.timeout;
    let mut attempts = 0u32;
    let mut last_error: Option<String> = None;

    let mut builder = ExponentialBuilder::default()
        .with_min_delay(config.min_delay)
        .with_max_delay(config.max_delay)
        .with_factor(2.0)
        .with_max_times(usize::MAX);
    if config.jitter {
        builder = builder.with_jitter();
    }
    let mut delays = builder.build();

    let timed_out = |attempts: u32, last_error: Option<String>| {
        warn!(
            resource = %resource_name,
            attempts,
            waited_ms = start.elapsed().as_millis(),
            "Timed out waiting for consistent state"
        );
        metrics::record_poll_outcome("timeout");
        ResourceError::Timeout {
            waited: start.elapsed(),
            attempts,
            last_error,
        }
    };
    let cancelled = || {
        debug!(resource = %resource_name, "Poll cancelled");
        metrics::record_poll_outcome("cancelled");
        ResourceError::Cancelled
    };

    loop {
        if Instant::now() >= deadline {
            return Err(timed_out(attempts, last_error));
        }
        attempts += 1;
        metrics::increment_poll_attempts();

        let result = tokio::select! {
            biased;
            () = wait_cancelled(cancel) => return Err(cancelled()),
            () = tokio::time::sleep_until(deadline) => return Err(timed_out(attempts, last_error)),
            result = fetch() => result,
        };

        match condition.evaluate(result.as_ref()) {
            Decision::Satisfied => {
                debug!(resource = %resource_name, attempts, "Consistent state reached");
                metrics::record_poll_outcome("satisfied");
                return Ok(result.ok());
            }
            Decision::Stop => {
                return match result {
                    Ok(value) => {
                        metrics::record_poll_outcome("satisfied");
                        Ok(Some(value))
                    }
                    Err(e) => {
                        warn!(resource = %resource_name, error = %e, "Poll stopped on error");
                        metrics::record_poll_outcome("error");
                        Err(e)
                    }
                };
            }
            Decision::Abort(e) => {
                warn!(resource = %resource_name, error = %e, "Poll aborted");
                metrics::record_poll_outcome("error");
                return Err(e);
            }
            Decision::Retry => {
                if let Err(e) = &result {
                    last_error = Some(e.to_string());
                }

                // Jitter is added on top of the capped delay, so cap again
                let delay = delays
                    .next()
                    .unwrap_or(config.max_delay)
                    .min(config.max_delay)
                    .min(deadline.saturating_duration_since(Instant::now()));
                debug!(
                    resource = %resource_name,
                    attempt = attempts,
                    delay_ms = delay.as_millis(),
                    "Not yet consistent, retrying"
                );

                tokio::select! {
                    biased;
                    () = wait_cancelled(cancel) => return Err(cancelled()),
                    () = tokio::time::sleep(delay) => {}
                }
            }
        }
    }
}

/// Wait until the resource has been seen on `required` consecutive fetches
pub async fn until_found<T, F, Fut>(
    config: &PollConfig,
    cancel: Option<&CancellationToken>,
    required: u32,
    fetch: F,
    resource_name: &str,
) -> Result<Option<T>, ResourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ResourceError>>,
{
    poll_until(config, cancel, fetch, UntilFound::new(required), resource_name).await
}

/// Wait until the fetch reports not-found
pub async fn until_not_found<T, F, Fut>(
    config: &PollConfig,
    cancel: Option<&CancellationToken>,
    fetch: F,
    resource_name: &str,
) -> Result<(), ResourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ResourceError>>,
{
    poll_until(config, cancel, fetch, UntilNotFound, resource_name)
        .await
        .map(|_| ())
}

/// Wait until the fetched value satisfies `predicate`
pub async fn until_match<T, F, Fut, P>(
    config: &PollConfig,
    cancel: Option<&CancellationToken>,
    fetch: F,
    predicate: P,
    resource_name: &str,
) -> Result<Option<T>, ResourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ResourceError>>,
    P: FnMut(&T) -> bool + Send,
{
    poll_until(config, cancel, fetch, UntilMatch::new(predicate), resource_name).await
}

async fn wait_cancelled(cancel: Option<&CancellationToken>) {
    match cancel {
        Some(token) => token.cancelled().await,
        None => std::future::pending::<()>().await,
    }
}
