//! # AWS Resource Manager
//!
//! Resource handlers for AWS account alternate contacts and IAM user login
//! profiles, built on direct AWS API calls.
//!
//! ## Overview
//!
//! Each handler performs create / read / update / delete / import against the
//! remote API and then waits for AWS to become consistent:
//!
//! 1. **Consistency polling** - `poll` retries a fetch until a condition holds
//!    (found N times in a row, gone, or matching what was written), the
//!    deadline passes, or the caller cancels
//! 2. **Password generation** - `password` draws IAM-policy-conformant
//!    passwords from the OS CSPRNG by rejection sampling
//! 3. **PGP encryption** - `encryption` optionally encrypts generated passwords
//!    for a Keybase user or an inline public key
//! 4. **Composite IDs** - `id` encodes `AccountID/ContactType` identifiers
//!
//! ## Features
//!
//! - **Typed errors**: not-found, transient and fatal AWS errors are told apart
//!   by error code
//! - **Cancellation**: every wait races a `CancellationToken`
//! - **Prometheus metrics**: poll attempts/outcomes and per-operation counters
//! - **Environment configuration**: timeouts and backoff are overridable

pub mod config;
pub mod constants;
pub mod encryption;
pub mod error;
pub mod id;
pub mod model;
pub mod observability;
pub mod password;
pub mod poll;
pub mod provider;
pub mod resource;
pub mod runtime;

pub use error::ResourceError;
