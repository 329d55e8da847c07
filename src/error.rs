//! # Resource Errors
//!
//! Error kinds shared by the poller, the providers and the resource handlers,
//! with classification of AWS error codes into not-found, transient and fatal.

use std::time::Duration;
use thiserror::Error;

use crate::password::PasswordError;

/// Errors produced while managing a remote resource
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The remote resource does not exist (expected while polling)
    #[error("{resource} ({id}) not found")]
    NotFound { resource: &'static str, id: String },

    /// The API answered without the object we asked for
    #[error("empty result from {operation}")]
    EmptyResult { operation: &'static str },

    /// The deadline elapsed before the remote state became consistent
    #[error("timeout while waiting for state to become consistent after {waited:?} ({attempts} attempts){}", .last_error.as_ref().map(|e| format!(", last error: {e}")).unwrap_or_default())]
    Timeout {
        waited: Duration,
        attempts: u32,
        last_error: Option<String>,
    },

    /// The caller cancelled the operation
    #[error("operation cancelled")]
    Cancelled,

    /// An argument failed validation
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// A resource ID could not be decoded
    #[error("unexpected format for ID ({id}), expected {expected}")]
    InvalidId { id: String, expected: String },

    /// Retryable API failure (throttling, transport, entity briefly locked)
    #[error("transient AWS error{}: {message}", .code.as_ref().map(|c| format!(" {c}")).unwrap_or_default())]
    Transient { code: Option<String>, message: String },

    /// Non-retryable API failure
    #[error("AWS error{}: {message}", .code.as_ref().map(|c| format!(" {c}")).unwrap_or_default())]
    Api { code: Option<String>, message: String },

    #[error(transparent)]
    Password(#[from] PasswordError),

    /// PGP key retrieval or encryption failed
    #[error("encrypting password: {0}")]
    Encryption(String),

    /// A failure annotated with the operation and resource key it belongs to
    #[error("{context}: {cause}")]
    Context {
        context: String,
        cause: Box<ResourceError>,
    },
}

impl ResourceError {
    /// Wrap this error with the identifying key of the failed operation
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        ResourceError::Context {
            context: context.into(),
            cause: Box::new(self),
        }
    }

    /// Innermost error, skipping context wrappers
    pub fn root(&self) -> &ResourceError {
        match self {
            ResourceError::Context { cause, .. } => cause.root(),
            other => other,
        }
    }

    /// Check if this is a "not found" error (empty results count as not found)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.root(),
            ResourceError::NotFound { .. } | ResourceError::EmptyResult { .. }
        )
    }

    /// Check if this error may clear up on its own
    pub fn is_retryable(&self) -> bool {
        matches!(self.root(), ResourceError::Transient { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.root(), ResourceError::Timeout { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.root(), ResourceError::Cancelled)
    }

    /// AWS error code, if the error came from an API call
    pub fn code(&self) -> Option<&str> {
        match self.root() {
            ResourceError::Transient { code, .. } | ResourceError::Api { code, .. } => {
                code.as_deref()
            }
            _ => None,
        }
    }

    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ResourceError::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Known AWS error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &["ResourceNotFoundException", "NoSuchEntity"];

/// Known AWS error codes that clear up when retried
const TRANSIENT_CODES: &[&str] = &[
    "EntityTemporarilyUnmodifiable",
    "ConcurrentModification",
    "Throttling",
    "ThrottlingException",
    "TooManyRequestsException",
    "RequestLimitExceeded",
    "ServiceFailure",
    "InternalServerException",
    "ServiceUnavailable",
];

/// Classify an AWS error code into a resource error.
///
/// `resource` and `id` name the object the request was about; they are only
/// used for not-found errors.
pub fn classify_aws_error(
    code: Option<&str>,
    message: &str,
    resource: &'static str,
    id: &str,
) -> ResourceError {
    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => ResourceError::NotFound {
            resource,
            id: id.to_string(),
        },
        Some(c) if TRANSIENT_CODES.contains(&c) => ResourceError::Transient {
            code: Some(c.to_string()),
            message: message.to_string(),
        },
        _ => ResourceError::Api {
            code: code.map(ToString::to_string),
            message: message.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_not_found_codes() {
        let err = classify_aws_error(
            Some("ResourceNotFoundException"),
            "no contact",
            "Account Alternate Contact",
            "BILLING",
        );
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Account Alternate Contact (BILLING) not found");

        let err = classify_aws_error(Some("NoSuchEntity"), "gone", "IAM User Login Profile", "bob");
        assert!(err.is_not_found());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_classify_transient_codes() {
        let err = classify_aws_error(
            Some("EntityTemporarilyUnmodifiable"),
            "Login Profile for User bob cannot be modified while login profile is being created.",
            "IAM User Login Profile",
            "bob",
        );
        assert!(err.is_retryable());
        assert_eq!(err.code(), Some("EntityTemporarilyUnmodifiable"));

        let err = classify_aws_error(Some("ThrottlingException"), "slow down", "x", "y");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_classify_fatal_codes() {
        let err = classify_aws_error(Some("AccessDeniedException"), "denied", "x", "y");
        assert!(!err.is_retryable());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "AWS error AccessDeniedException: denied");

        let err = classify_aws_error(None, "connection reset", "x", "y");
        assert_eq!(err.code(), None);
        assert_eq!(err.to_string(), "AWS error: connection reset");
    }

    #[test]
    fn test_context_preserves_kind() {
        let err = ResourceError::NotFound {
            resource: "IAM User Login Profile",
            id: "alice".to_string(),
        }
        .context("reading IAM User Login Profile (alice)");

        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "reading IAM User Login Profile (alice): IAM User Login Profile (alice) not found"
        );

        let err = ResourceError::Cancelled.context("waiting").context("deleting");
        assert!(err.is_cancelled());
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_empty_result_is_not_found() {
        let err = ResourceError::EmptyResult {
            operation: "GetAlternateContact",
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn test_timeout_message_includes_last_error() {
        let err = ResourceError::Timeout {
            waited: Duration::from_secs(2),
            attempts: 4,
            last_error: Some("thing (x) not found".to_string()),
        };
        assert!(err.is_timeout());
        let message = err.to_string();
        assert!(message.contains("4 attempts"), "{message}");
        assert!(message.contains("last error: thing (x) not found"), "{message}");
    }
}
