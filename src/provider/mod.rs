//! # Providers
//!
//! Traits over the remote APIs used by the resource handlers.
//!
//! The handlers only depend on these traits, so they can be driven by the AWS
//! SDK implementations in [`aws`] or by in-memory fakes in tests. Every
//! method reports failures as classified [`ResourceError`]s: "does not exist"
//! must come back as a not-found kind, throttling and similar as transient.

pub mod aws;

use async_trait::async_trait;

use crate::error::ResourceError;
use crate::model::{ContactDetails, ContactType, LoginProfile};

/// Account alternate contacts (AWS Account API)
///
/// `account_id` is `None` for the caller's own account.
#[async_trait]
pub trait AlternateContactApi: Send + Sync {
    /// Create or replace a contact
    async fn put_alternate_contact(
        &self,
        account_id: Option<&str>,
        contact_type: ContactType,
        details: &ContactDetails,
    ) -> Result<(), ResourceError>;

    /// Current contact details
    async fn get_alternate_contact(
        &self,
        account_id: Option<&str>,
        contact_type: ContactType,
    ) -> Result<ContactDetails, ResourceError>;

    async fn delete_alternate_contact(
        &self,
        account_id: Option<&str>,
        contact_type: ContactType,
    ) -> Result<(), ResourceError>;
}

/// IAM user login profiles
#[async_trait]
pub trait LoginProfileApi: Send + Sync {
    async fn create_login_profile(
        &self,
        user_name: &str,
        password: &str,
        password_reset_required: bool,
    ) -> Result<LoginProfile, ResourceError>;

    async fn get_login_profile(&self, user_name: &str) -> Result<LoginProfile, ResourceError>;

    async fn delete_login_profile(&self, user_name: &str) -> Result<(), ResourceError>;
}
