//! # Timeout Configuration
//!
//! How long each operation may wait for AWS to become consistent.

use std::time::Duration;

use super::env_var_or_default;
use crate::constants::{
    DEFAULT_ALTERNATE_CONTACT_CREATE_TIMEOUT_SECS, DEFAULT_ALTERNATE_CONTACT_DELETE_TIMEOUT_SECS,
    DEFAULT_ALTERNATE_CONTACT_UPDATE_TIMEOUT_SECS, DEFAULT_IAM_PROPAGATION_TIMEOUT_SECS,
};

/// Per-operation consistency timeouts
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Wait for a new alternate contact to become readable
    pub alternate_contact_create: Duration,
    /// Wait for updated alternate contact fields to be read back
    pub alternate_contact_update: Duration,
    /// Wait for a deleted alternate contact to disappear
    pub alternate_contact_delete: Duration,
    /// IAM eventual consistency window (login profile read and delete)
    pub iam_propagation: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            alternate_contact_create: Duration::from_secs(
                DEFAULT_ALTERNATE_CONTACT_CREATE_TIMEOUT_SECS,
            ),
            alternate_contact_update: Duration::from_secs(
                DEFAULT_ALTERNATE_CONTACT_UPDATE_TIMEOUT_SECS,
            ),
            alternate_contact_delete: Duration::from_secs(
                DEFAULT_ALTERNATE_CONTACT_DELETE_TIMEOUT_SECS,
            ),
            iam_propagation: Duration::from_secs(DEFAULT_IAM_PROPAGATION_TIMEOUT_SECS),
        }
    }
}

impl TimeoutConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            alternate_contact_create: Duration::from_secs(env_var_or_default(
                "ALTERNATE_CONTACT_CREATE_TIMEOUT_SECS",
                DEFAULT_ALTERNATE_CONTACT_CREATE_TIMEOUT_SECS,
            )),
            alternate_contact_update: Duration::from_secs(env_var_or_default(
                "ALTERNATE_CONTACT_UPDATE_TIMEOUT_SECS",
                DEFAULT_ALTERNATE_CONTACT_UPDATE_TIMEOUT_SECS,
            )),
            alternate_contact_delete: Duration::from_secs(env_var_or_default(
                "ALTERNATE_CONTACT_DELETE_TIMEOUT_SECS",
                DEFAULT_ALTERNATE_CONTACT_DELETE_TIMEOUT_SECS,
            )),
            iam_propagation: Duration::from_secs(env_var_or_default(
                "IAM_PROPAGATION_TIMEOUT_SECS",
                DEFAULT_IAM_PROPAGATION_TIMEOUT_SECS,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        let config = TimeoutConfig::default();
        assert_eq!(config.alternate_contact_create, Duration::from_secs(300));
        assert_eq!(config.alternate_contact_update, Duration::from_secs(300));
        assert_eq!(config.alternate_contact_delete, Duration::from_secs(300));
        assert_eq!(config.iam_propagation, Duration::from_secs(120));
    }
}
