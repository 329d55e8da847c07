//! # Initialization
//!
//! Runtime initialization logic including rustls setup, tracing, metrics,
//! configuration loading and AWS client creation.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::{load_config, HandlerConfig};
use crate::constants::DEFAULT_LOG_FILTER;
use crate::encryption::GpgEncryptor;
use crate::observability;
use crate::provider::aws::{create_sdk_config, AwsAccountClient, AwsIamClient};
use crate::resource::{AlternateContactResource, LoginProfileResource};

/// Everything a command needs to run
#[derive(Debug)]
pub struct InitializationResult {
    pub config: HandlerConfig,
    pub alternate_contacts: AlternateContactResource,
    pub login_profiles: LoginProfileResource,
    /// Cancelled on Ctrl-C; pass to every handler call
    pub cancel: CancellationToken,
}

/// Install the rustls crypto provider (ring).
///
/// Must run before any TLS client is built. A provider that is already
/// installed is kept.
pub fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("rustls crypto provider was already installed");
    }
}

/// Initialize logging and metrics only (commands that make no AWS calls)
pub fn initialize_observability() -> Result<()> {
    install_crypto_provider();
    observability::logging::init_tracing(DEFAULT_LOG_FILTER);
    observability::metrics::register_metrics().context("Failed to register metrics")?;
    Ok(())
}

/// Initialize the runtime
///
/// This function handles:
/// - rustls crypto provider setup
/// - Tracing subscriber setup
/// - Metrics registration
/// - Configuration from the environment
/// - AWS SDK config and service clients
/// - Ctrl-C cancellation
pub async fn initialize() -> Result<InitializationResult> {
    initialize_observability()?;

    let config = load_config();
    info!(
        create_timeout_secs = config.timeouts.alternate_contact_create.as_secs(),
        propagation_timeout_secs = config.timeouts.iam_propagation.as_secs(),
        poll_min_delay_ms = config.poll.min_delay.as_millis(),
        poll_max_delay_ms = config.poll.max_delay.as_millis(),
        "Loaded configuration"
    );

    let sdk_config = create_sdk_config(&config.aws).await;
    let account = AwsAccountClient::new(&sdk_config, config.aws.account_endpoint.as_deref());
    let iam = AwsIamClient::new(&sdk_config, config.aws.iam_endpoint.as_deref());

    let alternate_contacts = AlternateContactResource::new(Arc::new(account), &config);
    let login_profiles =
        LoginProfileResource::new(Arc::new(iam), Arc::new(GpgEncryptor::default()), &config);

    Ok(InitializationResult {
        config,
        alternate_contacts,
        login_profiles,
        cancel: cancel_on_ctrl_c(),
    })
}

/// Token that is cancelled when the process receives Ctrl-C
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl-C, cancelling in-flight operations");
            child.cancel();
        }
    });
    token
}
