//! # Constants
//!
//! Process-wide defaults for timeouts, polling, identifiers and the password policy.
//! Every value here can be overridden through the environment (see `config`),
//! except the password character classes and the resource ID separator.

/// Separator between the account ID and the contact type in alternate contact IDs
pub const RESOURCE_ID_SEPARATOR: &str = "/";

/// Default timeout for alternate contact create (seconds)
pub const DEFAULT_ALTERNATE_CONTACT_CREATE_TIMEOUT_SECS: u64 = 300;

/// Default timeout for alternate contact update (seconds)
pub const DEFAULT_ALTERNATE_CONTACT_UPDATE_TIMEOUT_SECS: u64 = 300;

/// Default timeout for alternate contact delete (seconds)
pub const DEFAULT_ALTERNATE_CONTACT_DELETE_TIMEOUT_SECS: u64 = 300;

/// How long IAM changes may take to become visible (seconds)
pub const DEFAULT_IAM_PROPAGATION_TIMEOUT_SECS: u64 = 120;

/// First delay between consistency polls (milliseconds)
pub const DEFAULT_POLL_MIN_DELAY_MS: u64 = 500;

/// Cap for the exponential poll delay (milliseconds)
pub const DEFAULT_POLL_MAX_DELAY_MS: u64 = 10_000;

/// Consecutive successful reads required before a create is considered visible.
/// Some account-level APIs flip between found and not found before settling.
pub const DEFAULT_POLL_FOUND_STREAK: u32 = 2;

/// Default generated password length
pub const DEFAULT_PASSWORD_LENGTH: usize = 20;

/// Shortest password length accepted by the login profile handler
pub const MIN_PASSWORD_LENGTH: usize = 5;

/// Longest password length accepted by the login profile handler
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Candidate passwords drawn before giving up on the policy
pub const PASSWORD_ATTEMPT_BUDGET: u32 = 100_000;

pub const CHAR_LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
pub const CHAR_UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const CHAR_NUMBERS: &str = "0123456789";
pub const CHAR_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|'";

/// Default tracing filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "aws_resource_manager=info,armctl=info";

/// Keybase user lookup endpoint for `keybase:<user>` PGP keys
pub const KEYBASE_LOOKUP_URL: &str = "https://keybase.io/_/api/1.0/user/lookup.json";
