//! # Alternate Contact Model
//!
//! An alternate contact is identified by an optional account (empty = the
//! caller's own account) and a contact type; the other fields are mutable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ResourceError;

/// Which alternate contact of the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactType {
    Billing,
    Operations,
    Security,
}

impl ContactType {
    pub const ALL: [ContactType; 3] = [
        ContactType::Billing,
        ContactType::Operations,
        ContactType::Security,
    ];

    /// Wire name used by the Account API and in resource IDs
    pub fn as_str(self) -> &'static str {
        match self {
            ContactType::Billing => "BILLING",
            ContactType::Operations => "OPERATIONS",
            ContactType::Security => "SECURITY",
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactType {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContactType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                ResourceError::validation(
                    "alternate_contact_type",
                    format!("expected one of BILLING, OPERATIONS, SECURITY, got {s:?}"),
                )
            })
    }
}

/// Mutable fields of a contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email_address: String,
    pub name: String,
    pub phone_number: String,
    pub title: String,
}

/// Arguments for creating a contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternateContactArgs {
    /// Target account; `None` means the caller's own account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub alternate_contact_type: ContactType,
    #[serde(flatten)]
    pub details: ContactDetails,
}

/// Contact as read back from AWS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateContact {
    pub id: String,
    /// Empty for the caller's own account
    pub account_id: String,
    pub alternate_contact_type: ContactType,
    #[serde(flatten)]
    pub details: ContactDetails,
}
