//! # Configuration
//!
//! Handler configuration loaded from environment variables.
//!
//! All configuration has sensible defaults (see `constants`) and can be
//! overridden via environment variables.

mod aws;
mod poll;
mod timeouts;

pub use aws::AwsSettings;
pub use poll::PollConfig;
pub use timeouts::TimeoutConfig;

/// Complete configuration for the resource handlers
#[derive(Debug, Clone, Default)]
pub struct HandlerConfig {
    pub timeouts: TimeoutConfig,
    pub poll: PollConfig,
    pub aws: AwsSettings,
}

impl HandlerConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            timeouts: TimeoutConfig::from_env(),
            poll: PollConfig::from_env(),
            aws: AwsSettings::from_env(),
        }
    }
}

/// Load configuration from environment variables with defaults
pub fn load_config() -> HandlerConfig {
    HandlerConfig::from_env()
}

/// Read environment variable or return default value
pub(crate) fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T
where
    <T as std::str::FromStr>::Err: std::fmt::Debug,
{
    parse_or_default(std::env::var(key).ok().as_deref(), default)
}

/// Read an optional, non-empty environment variable
pub(crate) fn env_var_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or_default<T: std::str::FromStr>(value: Option<&str>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
