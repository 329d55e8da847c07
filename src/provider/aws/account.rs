//! # AWS Account Client
//!
//! Alternate contacts through the AWS Account API.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_account::types::AlternateContactType;
use aws_sdk_account::Client;
use tracing::{debug, info};

use super::map_sdk_error;
use crate::error::ResourceError;
use crate::id::create_resource_id;
use crate::model::{ContactDetails, ContactType};
use crate::provider::AlternateContactApi;

const RESOURCE: &str = "Account Alternate Contact";

/// Account API client
#[derive(Debug, Clone)]
pub struct AwsAccountClient {
    client: Client,
}

impl AwsAccountClient {
    pub fn new(sdk_config: &SdkConfig, endpoint: Option<&str>) -> Self {
        let mut builder = aws_sdk_account::config::Builder::from(sdk_config);
        if let Some(endpoint) = endpoint {
            info!("Routing AWS Account API requests to {}", endpoint);
            builder = builder.endpoint_url(endpoint);
        }
        Self {
            client: Client::from_conf(builder.build()),
        }
    }
}

fn contact_id(account_id: Option<&str>, contact_type: ContactType) -> String {
    create_resource_id(account_id.unwrap_or_default(), contact_type.as_str())
}

#[async_trait]
impl AlternateContactApi for AwsAccountClient {
    async fn put_alternate_contact(
        &self,
        account_id: Option<&str>,
        contact_type: ContactType,
        details: &ContactDetails,
    ) -> Result<(), ResourceError> {
        debug!(contact_type = %contact_type, "PutAlternateContact");
        self.client
            .put_alternate_contact()
            .set_account_id(account_id.map(ToString::to_string))
            .alternate_contact_type(AlternateContactType::from(contact_type.as_str()))
            .email_address(&details.email_address)
            .name(&details.name)
            .phone_number(&details.phone_number)
            .title(&details.title)
            .send()
            .await
            .map_err(|e| map_sdk_error(&e, RESOURCE, &contact_id(account_id, contact_type)))?;
        Ok(())
    }

    async fn get_alternate_contact(
        &self,
        account_id: Option<&str>,
        contact_type: ContactType,
    ) -> Result<ContactDetails, ResourceError> {
        let output = self
            .client
            .get_alternate_contact()
            .set_account_id(account_id.map(ToString::to_string))
            .alternate_contact_type(AlternateContactType::from(contact_type.as_str()))
            .send()
            .await
            .map_err(|e| map_sdk_error(&e, RESOURCE, &contact_id(account_id, contact_type)))?;

        let contact = output.alternate_contact().ok_or(ResourceError::EmptyResult {
            operation: "GetAlternateContact",
        })?;

        Ok(ContactDetails {
            email_address: contact.email_address().unwrap_or_default().to_string(),
            name: contact.name().unwrap_or_default().to_string(),
            phone_number: contact.phone_number().unwrap_or_default().to_string(),
            title: contact.title().unwrap_or_default().to_string(),
        })
    }

    async fn delete_alternate_contact(
        &self,
        account_id: Option<&str>,
        contact_type: ContactType,
    ) -> Result<(), ResourceError> {
        debug!(contact_type = %contact_type, "DeleteAlternateContact");
        self.client
            .delete_alternate_contact()
            .set_account_id(account_id.map(ToString::to_string))
            .alternate_contact_type(AlternateContactType::from(contact_type.as_str()))
            .send()
            .await
            .map_err(|e| map_sdk_error(&e, RESOURCE, &contact_id(account_id, contact_type)))?;
        Ok(())
    }
}
