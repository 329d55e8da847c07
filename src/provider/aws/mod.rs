//! # AWS Providers
//!
//! AWS SDK implementations of the provider traits.
//!
//! - `auth` - SDK configuration (region, profile, credentials chain)
//! - `account` - Account API alternate contacts
//! - `iam` - IAM login profiles

mod account;
mod auth;
mod iam;

pub use account::AwsAccountClient;
pub use auth::create_sdk_config;
pub use iam::AwsIamClient;

use aws_sdk_iam::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use crate::error::{classify_aws_error, ResourceError};

/// Convert an SDK error into a classified [`ResourceError`].
///
/// Transport failures and timeouts never reached the service and are
/// retryable; service errors are classified by their error code.
pub(crate) fn map_sdk_error<E, R>(
    err: &SdkError<E, R>,
    resource: &'static str,
    id: &str,
) -> ResourceError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(err).to_string();
    match err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => ResourceError::Transient {
            code: None,
            message,
        },
        _ => classify_aws_error(err.code(), &message, resource, id),
    }
}
