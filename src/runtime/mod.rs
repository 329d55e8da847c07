//! # Runtime Module
//!
//! Process initialization for the `armctl` binary: TLS provider, tracing,
//! metrics, configuration, AWS clients and the cancellation token.

pub mod initialization;

pub use initialization::*;
