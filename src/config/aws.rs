//! # AWS Settings
//!
//! Region, profile and endpoint overrides for the AWS SDK clients.

use super::env_var_opt;

/// AWS client settings
///
/// Credentials always come from the SDK default chain; only routing is configured here.
#[derive(Debug, Clone, Default)]
pub struct AwsSettings {
    /// Region override (defaults to the SDK region chain)
    pub region: Option<String>,
    /// Named profile from the shared config files
    pub profile: Option<String>,
    /// Endpoint override for the Account API (mock servers, tests)
    pub account_endpoint: Option<String>,
    /// Endpoint override for the IAM API (mock servers, tests)
    pub iam_endpoint: Option<String>,
}

impl AwsSettings {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            region: env_var_opt("AWS_REGION"),
            profile: env_var_opt("AWS_PROFILE"),
            account_endpoint: env_var_opt("AWS_ACCOUNT_ENDPOINT"),
            iam_endpoint: env_var_opt("AWS_IAM_ENDPOINT"),
        }
    }
}
