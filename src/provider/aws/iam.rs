//! # AWS IAM Client
//!
//! IAM user login profiles.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_iam::Client;
use tracing::{debug, info};

use super::map_sdk_error;
use crate::error::ResourceError;
use crate::model::LoginProfile;
use crate::provider::LoginProfileApi;

const RESOURCE: &str = "IAM User Login Profile";

/// IAM client for login profiles
#[derive(Debug, Clone)]
pub struct AwsIamClient {
    client: Client,
}

impl AwsIamClient {
    pub fn new(sdk_config: &SdkConfig, endpoint: Option<&str>) -> Self {
        let mut builder = aws_sdk_iam::config::Builder::from(sdk_config);
        if let Some(endpoint) = endpoint {
            info!("Routing AWS IAM requests to {}", endpoint);
            builder = builder.endpoint_url(endpoint);
        }
        Self {
            client: Client::from_conf(builder.build()),
        }
    }
}

fn to_model(profile: &aws_sdk_iam::types::LoginProfile) -> LoginProfile {
    LoginProfile {
        user_name: profile.user_name().to_string(),
        password_reset_required: profile.password_reset_required(),
    }
}

#[async_trait]
impl LoginProfileApi for AwsIamClient {
    async fn create_login_profile(
        &self,
        user_name: &str,
        password: &str,
        password_reset_required: bool,
    ) -> Result<LoginProfile, ResourceError> {
        debug!(user = %user_name, "CreateLoginProfile");
        let output = self
            .client
            .create_login_profile()
            .user_name(user_name)
            .password(password)
            .password_reset_required(password_reset_required)
            .send()
            .await
            .map_err(|e| map_sdk_error(&e, RESOURCE, user_name))?;

        output
            .login_profile()
            .map(to_model)
            .ok_or(ResourceError::EmptyResult {
                operation: "CreateLoginProfile",
            })
    }

    async fn get_login_profile(&self, user_name: &str) -> Result<LoginProfile, ResourceError> {
        let output = self
            .client
            .get_login_profile()
            .user_name(user_name)
            .send()
            .await
            .map_err(|e| map_sdk_error(&e, RESOURCE, user_name))?;

        output
            .login_profile()
            .map(to_model)
            .ok_or(ResourceError::EmptyResult {
                operation: "GetLoginProfile",
            })
    }

    async fn delete_login_profile(&self, user_name: &str) -> Result<(), ResourceError> {
        debug!(user = %user_name, "DeleteLoginProfile");
        self.client
            .delete_login_profile()
            .user_name(user_name)
            .send()
            .await
            .map_err(|e| map_sdk_error(&e, RESOURCE, user_name))?;
        Ok(())
    }
}
