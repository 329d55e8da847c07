//! # AWS Authentication
//!
//! Handles AWS SDK configuration and authentication setup.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::info;

use crate::config::AwsSettings;

/// Create AWS SDK config using the default credential chain.
///
/// Region and profile come from [`AwsSettings`] when set, otherwise from the
/// usual SDK sources (environment, shared config files, instance metadata).
pub async fn create_sdk_config(settings: &AwsSettings) -> SdkConfig {
    let mut builder = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &settings.region {
        builder = builder.region(Region::new(region.clone()));
    }
    if let Some(profile) = &settings.profile {
        info!("Using AWS profile: {}", profile);
        builder = builder.profile_name(profile);
    }

    let sdk_config = builder.load().await;

    info!(
        region = sdk_config.region().map(|r| r.as_ref()).unwrap_or("<unset>"),
        "Loaded AWS SDK configuration"
    );
    sdk_config
}
