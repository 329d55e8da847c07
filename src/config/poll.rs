//! # Poll Configuration
//!
//! Backoff settings for consistency polling.

use std::time::Duration;

use super::env_var_or_default;
use crate::constants::{
    DEFAULT_POLL_FOUND_STREAK, DEFAULT_POLL_MAX_DELAY_MS, DEFAULT_POLL_MIN_DELAY_MS,
};

/// Configuration for consistency polling with exponential backoff.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay before the second attempt
    pub min_delay: Duration,
    /// Maximum delay between attempts (cap for exponential growth)
    pub max_delay: Duration,
    /// Maximum total time to wait before timing out
    pub timeout: Duration,
    /// Randomize delays to spread out concurrent pollers
    pub jitter: bool,
    /// Consecutive successful reads required after a create
    pub found_streak: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(DEFAULT_POLL_MIN_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_POLL_MAX_DELAY_MS),
            timeout: Duration::from_secs(60),
            jitter: true,
            found_streak: DEFAULT_POLL_FOUND_STREAK,
        }
    }
}

impl PollConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_delay: Duration::from_millis(env_var_or_default(
                "POLL_MIN_DELAY_MS",
                DEFAULT_POLL_MIN_DELAY_MS,
            )),
            max_delay: Duration::from_millis(env_var_or_default(
                "POLL_MAX_DELAY_MS",
                DEFAULT_POLL_MAX_DELAY_MS,
            )),
            jitter: env_var_or_default("POLL_JITTER", defaults.jitter),
            found_streak: env_var_or_default("POLL_FOUND_STREAK", DEFAULT_POLL_FOUND_STREAK)
                .max(1),
            timeout: defaults.timeout,
        }
    }

    /// Same backoff settings with a different overall deadline
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout,
            ..self.clone()
        }
    }
}
