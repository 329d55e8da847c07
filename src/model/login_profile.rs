//! # Login Profile Model
//!
//! The console password of an IAM user. AWS never returns the password, so
//! whatever was generated at creation only survives in [`LoginProfileState`].

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

use crate::constants::DEFAULT_PASSWORD_LENGTH;

fn default_password_length() -> usize {
    DEFAULT_PASSWORD_LENGTH
}

/// Arguments for creating a login profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginProfileArgs {
    pub user: String,
    #[serde(default = "default_password_length")]
    pub password_length: usize,
    #[serde(default)]
    pub password_reset_required: bool,
    /// `keybase:<username>` or a base64-encoded PGP public key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pgp_key: Option<String>,
}

impl LoginProfileArgs {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password_length: DEFAULT_PASSWORD_LENGTH,
            password_reset_required: false,
            pgp_key: None,
        }
    }
}

/// Login profile as reported by IAM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginProfile {
    pub user_name: String,
    pub password_reset_required: bool,
}

/// Handler state for a login profile
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginProfileState {
    /// Same as `user`
    pub id: String,
    pub user: String,
    pub password_length: usize,
    pub password_reset_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pgp_key: Option<String>,
    /// Plaintext password, only kept when no PGP key was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Zeroizing<String>>,
    /// Base64 PGP message holding the password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_fingerprint: Option<String>,
}

impl LoginProfileState {
    /// State for an imported profile: nothing generated is known
    pub fn imported(user: impl Into<String>) -> Self {
        let user = user.into();
        Self {
            id: user.clone(),
            user,
            password_length: DEFAULT_PASSWORD_LENGTH,
            password_reset_required: false,
            pgp_key: None,
            password: None,
            encrypted_password: None,
            key_fingerprint: None,
        }
    }
}

impl fmt::Debug for LoginProfileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginProfileState")
            .field("id", &self.id)
            .field("user", &self.user)
            .field("password_length", &self.password_length)
            .field("password_reset_required", &self.password_reset_required)
            .field("pgp_key", &self.pgp_key.as_ref().map(|_| "<set>"))
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("encrypted_password", &self.encrypted_password.is_some())
            .field("key_fingerprint", &self.key_fingerprint)
            .finish()
    }
}
