//! # Poll Conditions
//!
//! Decide after each fetch whether polling is done, should continue, or must fail.
//!
//! Every built-in condition keeps retrying on transient API errors and on
//! not-found results (unless not-found is the goal), and stops on any other error.

use crate::error::ResourceError;

/// What the poller does after a fetch
#[derive(Debug)]
pub enum Decision {
    /// Not consistent yet: back off and fetch again
    Retry,
    /// Done. A successful fetch is returned as `Some(value)`, an error result as `None`
    Satisfied,
    /// Done. The fetch result is returned unchanged (errors propagate)
    Stop,
    /// Fail with an error chosen by the condition
    Abort(ResourceError),
}

/// Evaluates fetch results for [`poll_until`](super::poll_until)
pub trait Condition<T>: Send {
    fn evaluate(&mut self, result: Result<&T, &ResourceError>) -> Decision;
}

fn retry_or_stop(error: &ResourceError) -> Decision {
    if error.is_not_found() || error.is_retryable() {
        Decision::Retry
    } else {
        Decision::Stop
    }
}

/// Satisfied once the resource has been found on `required` consecutive fetches.
///
/// Guards against a single stale "found" answer: any not-found or transient
/// result in between resets the streak.
#[derive(Debug, Clone)]
pub struct UntilFound {
    required: u32,
    streak: u32,
}

impl UntilFound {
    pub fn new(required: u32) -> Self {
        Self {
            required: required.max(1),
            streak: 0,
        }
    }

    /// Current run of consecutive successful fetches
    pub fn streak(&self) -> u32 {
        self.streak
    }
}

impl<T> Condition<T> for UntilFound {
    fn evaluate(&mut self, result: Result<&T, &ResourceError>) -> Decision {
        match result {
            Ok(_) => {
                self.streak += 1;
                if self.streak >= self.required {
                    Decision::Satisfied
                } else {
                    Decision::Retry
                }
            }
            Err(e) => {
                self.streak = 0;
                retry_or_stop(e)
            }
        }
    }
}

/// Satisfied when the fetch reports that the resource is gone.
#[derive(Debug, Clone, Copy, Default)]
pub struct UntilNotFound;

impl<T> Condition<T> for UntilNotFound {
    fn evaluate(&mut self, result: Result<&T, &ResourceError>) -> Decision {
        match result {
            Ok(_) => Decision::Retry,
            Err(e) if e.is_not_found() => Decision::Satisfied,
            Err(e) if e.is_retryable() => Decision::Retry,
            Err(_) => Decision::Stop,
        }
    }
}

/// Satisfied when the fetched value passes `predicate`
/// (e.g. read-back fields equal the values just written).
#[derive(Debug, Clone)]
pub struct UntilMatch<P> {
    predicate: P,
}

impl<P> UntilMatch<P> {
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }
}

impl<T, P> Condition<T> for UntilMatch<P>
where
    P: FnMut(&T) -> bool + Send,
{
    fn evaluate(&mut self, result: Result<&T, &ResourceError>) -> Decision {
        match result {
            Ok(value) if (self.predicate)(value) => Decision::Satisfied,
            Ok(_) => Decision::Retry,
            Err(e) => retry_or_stop(e),
        }
    }
}

/// Condition backed by a closure
#[derive(Debug, Clone)]
pub struct FnCondition<F>(F);

/// Build a condition from a closure over each fetch result
pub fn from_fn<T, F>(f: F) -> FnCondition<F>
where
    F: FnMut(Result<&T, &ResourceError>) -> Decision + Send,
{
    FnCondition(f)
}

impl<T, F> Condition<T> for FnCondition<F>
where
    F: FnMut(Result<&T, &ResourceError>) -> Decision + Send,
{
    fn evaluate(&mut self, result: Result<&T, &ResourceError>) -> Decision {
        (self.0)(result)
    }
}
