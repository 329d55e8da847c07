//! # Alternate Contact Handler
//!
//! Manages the billing, operations and security contacts of an AWS account.
//! IDs are `AccountID/ContactType`, or just `ContactType` for the caller's
//! own account.

use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

use super::record_operation;
use super::validation::{validate_alternate_contact, validate_contact_details};
use crate::config::{HandlerConfig, PollConfig, TimeoutConfig};
use crate::error::ResourceError;
use crate::id::{create_resource_id, parse_resource_id};
use crate::model::{AlternateContact, AlternateContactArgs, ContactDetails, ContactType};
use crate::poll;
use crate::provider::AlternateContactApi;

const RESOURCE: &str = "Account Alternate Contact";
const METRIC_RESOURCE: &str = "alternate_contact";

/// Handler for account alternate contacts
pub struct AlternateContactResource {
    api: Arc<dyn AlternateContactApi>,
    poll: PollConfig,
    timeouts: TimeoutConfig,
}

impl std::fmt::Debug for AlternateContactResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlternateContactResource")
            .field("poll", &self.poll)
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}

/// Decoded `AccountID/ContactType`
struct ContactKey {
    account_id: String,
    contact_type: ContactType,
}

impl ContactKey {
    fn parse(id: &str) -> Result<Self, ResourceError> {
        let (account_id, contact_type) = parse_resource_id(id)?;
        Ok(Self {
            account_id,
            contact_type: contact_type.parse()?,
        })
    }

    /// `None` selects the caller's own account
    fn account(&self) -> Option<&str> {
        Some(self.account_id.as_str()).filter(|a| !a.is_empty())
    }
}

impl AlternateContactResource {
    pub fn new(api: Arc<dyn AlternateContactApi>, config: &HandlerConfig) -> Self {
        Self {
            api,
            poll: config.poll.clone(),
            timeouts: config.timeouts.clone(),
        }
    }

    /// Create (or take over) a contact and wait until it reads back consistently
    pub async fn create(
        &self,
        args: &AlternateContactArgs,
        cancel: Option<&CancellationToken>,
    ) -> Result<AlternateContact, ResourceError> {
        let id = create_resource_id(
            args.account_id.as_deref().unwrap_or_default(),
            args.alternate_contact_type.as_str(),
        );
        let span = info_span!("account.alternate_contact.create", contact.id = %id);
        let start = Instant::now();

        let result = async {
            validate_alternate_contact(args)?;
            let key = ContactKey {
                account_id: args.account_id.clone().unwrap_or_default(),
                contact_type: args.alternate_contact_type,
            };

            info!("Creating {} {}", RESOURCE, id);
            self.api
                .put_alternate_contact(key.account(), key.contact_type, &args.details)
                .await
                .map_err(|e| e.context(format!("creating {RESOURCE} ({id})")))?;

            let api = &self.api;
            let account = key.account();
            poll::until_found(
                &self.poll.with_timeout(self.timeouts.alternate_contact_create),
                cancel,
                self.poll.found_streak,
                move || api.get_alternate_contact(account, key.contact_type),
                &id,
            )
            .await
            .map_err(|e| e.context(format!("waiting for {RESOURCE} ({id}) create")))?;

            self.read_contact(&id, true)
                .await?
                .ok_or(ResourceError::EmptyResult {
                    operation: "GetAlternateContact",
                })
        }
        .instrument(span)
        .await;

        record_operation(METRIC_RESOURCE, &result, "create", start);
        result
    }

    /// Read a contact.
    ///
    /// Returns `None` when a previously created contact no longer exists.
    /// For a resource that was just created (`is_new`), not found is an error.
    pub async fn read(
        &self,
        id: &str,
        is_new: bool,
    ) -> Result<Option<AlternateContact>, ResourceError> {
        let span = info_span!("account.alternate_contact.read", contact.id = %id);
        let start = Instant::now();
        let result = self.read_contact(id, is_new).instrument(span).await;
        record_operation(METRIC_RESOURCE, &result, "read", start);
        result
    }

    async fn read_contact(
        &self,
        id: &str,
        is_new: bool,
    ) -> Result<Option<AlternateContact>, ResourceError> {
        let key = ContactKey::parse(id)?;

        match self
            .api
            .get_alternate_contact(key.account(), key.contact_type)
            .await
        {
            Ok(details) => Ok(Some(AlternateContact {
                id: id.to_string(),
                account_id: key.account_id,
                alternate_contact_type: key.contact_type,
                details,
            })),
            Err(e) if !is_new && e.is_not_found() => {
                warn!("{} ({}) not found, removing from state", RESOURCE, id);
                Ok(None)
            }
            Err(e) => Err(e.context(format!("reading {RESOURCE} ({id})"))),
        }
    }

    /// Replace the mutable fields and wait until AWS returns them
    pub async fn update(
        &self,
        id: &str,
        details: &ContactDetails,
        cancel: Option<&CancellationToken>,
    ) -> Result<AlternateContact, ResourceError> {
        let span = info_span!("account.alternate_contact.update", contact.id = %id);
        let start = Instant::now();

        let result = async {
            let key = ContactKey::parse(id)?;
            validate_contact_details(details)?;

            info!("Updating {} {}", RESOURCE, id);
            self.api
                .put_alternate_contact(key.account(), key.contact_type, details)
                .await
                .map_err(|e| e.context(format!("updating {RESOURCE} ({id})")))?;

            let api = &self.api;
            let account = key.account();
            poll::until_match(
                &self.poll.with_timeout(self.timeouts.alternate_contact_update),
                cancel,
                move || api.get_alternate_contact(account, key.contact_type),
                |current: &ContactDetails| current == details,
                id,
            )
            .await
            .map_err(|e| e.context(format!("waiting for {RESOURCE} ({id}) update")))?;

            self.read_contact(id, true)
                .await?
                .ok_or(ResourceError::EmptyResult {
                    operation: "GetAlternateContact",
                })
        }
        .instrument(span)
        .await;

        record_operation(METRIC_RESOURCE, &result, "update", start);
        result
    }

    /// Delete a contact and wait until it is gone. Deleting a missing contact succeeds.
    pub async fn delete(
        &self,
        id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), ResourceError> {
        let span = info_span!("account.alternate_contact.delete", contact.id = %id);
        let start = Instant::now();

        let result = async {
            let key = ContactKey::parse(id)?;

            debug!("Deleting {}: {}", RESOURCE, id);
            match self
                .api
                .delete_alternate_contact(key.account(), key.contact_type)
                .await
            {
                Err(e) if e.is_not_found() => return Ok(()),
                Err(e) => return Err(e.context(format!("deleting {RESOURCE} ({id})"))),
                Ok(()) => {}
            }

            let api = &self.api;
            let account = key.account();
            poll::until_not_found(
                &self.poll.with_timeout(self.timeouts.alternate_contact_delete),
                cancel,
                move || api.get_alternate_contact(account, key.contact_type),
                id,
            )
            .await
            .map_err(|e| e.context(format!("waiting for {RESOURCE} ({id}) delete")))
        }
        .instrument(span)
        .await;

        record_operation(METRIC_RESOURCE, &result, "delete", start);
        result
    }

    /// Import an existing contact by ID
    pub async fn import(&self, id: &str) -> Result<Option<AlternateContact>, ResourceError> {
        self.read(id, false).await
    }
}
