//! # Login Profile Handler
//!
//! Gives an IAM user a console password. The password is generated here,
//! handed to IAM once, and then only kept in the returned state: in plaintext,
//! or encrypted for a PGP key when one is configured.
//!
//! IAM is eventually consistent. A freshly created profile may not be readable
//! yet, and deleting one that is still being created fails with
//! `EntityTemporarilyUnmodifiable`; both are retried within the propagation
//! timeout, followed by one last direct attempt.

use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

use super::record_operation;
use super::validation::validate_password_length;
use crate::config::{HandlerConfig, PollConfig, TimeoutConfig};
use crate::encryption::ValueEncryptor;
use crate::error::ResourceError;
use crate::model::{LoginProfile, LoginProfileArgs, LoginProfileState};
use crate::password::generate_password;
use crate::poll::{self, Decision};
use crate::provider::LoginProfileApi;

const RESOURCE: &str = "IAM User Login Profile";
const METRIC_RESOURCE: &str = "login_profile";

/// Handler for IAM user login profiles
pub struct LoginProfileResource {
    api: Arc<dyn LoginProfileApi>,
    encryptor: Arc<dyn ValueEncryptor>,
    poll: PollConfig,
    timeouts: TimeoutConfig,
}

impl std::fmt::Debug for LoginProfileResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginProfileResource")
            .field("poll", &self.poll)
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}

impl LoginProfileResource {
    pub fn new(
        api: Arc<dyn LoginProfileApi>,
        encryptor: Arc<dyn ValueEncryptor>,
        config: &HandlerConfig,
    ) -> Self {
        Self {
            api,
            encryptor,
            poll: config.poll.clone(),
            timeouts: config.timeouts.clone(),
        }
    }

    /// Generate a password and create the login profile.
    ///
    /// With a PGP key the state carries only the ciphertext and the key
    /// fingerprint; without one it carries the plaintext password.
    pub async fn create(
        &self,
        args: &LoginProfileArgs,
    ) -> Result<LoginProfileState, ResourceError> {
        let span = info_span!("iam.login_profile.create", user.name = %args.user);
        let start = Instant::now();

        let result = async {
            let context = || format!("creating {RESOURCE} for {:?}", args.user);

            validate_password_length(args.password_length).map_err(|e| e.context(context()))?;
            let password = generate_password(args.password_length)
                .map_err(|e| ResourceError::from(e).context(context()))?;

            // A key or gpg failure must not leave behind a profile whose password is lost
            let encrypted = match &args.pgp_key {
                Some(pgp_key) => Some(
                    self.encryptor
                        .encrypt(pgp_key, &password, "Password")
                        .await
                        .map_err(|e| e.context(context()))?,
                ),
                None => None,
            };

            info!("Creating {} for {}", RESOURCE, args.user);
            let profile = self
                .api
                .create_login_profile(&args.user, &password, args.password_reset_required)
                .await
                .map_err(|e| e.context(context()))?;

            let (password, encrypted_password, key_fingerprint) = match encrypted {
                Some(encrypted) => (None, Some(encrypted.ciphertext), Some(encrypted.key_fingerprint)),
                None => (Some(password), None, None),
            };

            Ok(LoginProfileState {
                id: profile.user_name.clone(),
                user: profile.user_name,
                password_length: args.password_length,
                password_reset_required: profile.password_reset_required,
                pgp_key: args.pgp_key.clone(),
                password,
                encrypted_password,
                key_fingerprint,
            })
        }
        .instrument(span)
        .await;

        record_operation(METRIC_RESOURCE, &result, "create", start);
        result
    }

    /// Refresh `state` from IAM.
    ///
    /// Returns `None` when an existing profile has disappeared. For a profile
    /// that was just created (`is_new`), not-found is retried for the IAM
    /// propagation window. Generated secrets are carried over from `state`.
    pub async fn read(
        &self,
        state: &LoginProfileState,
        is_new: bool,
        cancel: Option<&CancellationToken>,
    ) -> Result<Option<LoginProfileState>, ResourceError> {
        let span = info_span!("iam.login_profile.read", user.name = %state.id);
        let start = Instant::now();

        let result = async {
            let id = state.id.as_str();
            let fetched = if is_new {
                self.read_with_propagation(id, cancel).await
            } else {
                self.api.get_login_profile(id).await
            };

            match fetched {
                Ok(profile) => Ok(Some(LoginProfileState {
                    user: profile.user_name,
                    password_reset_required: profile.password_reset_required,
                    ..state.clone()
                })),
                Err(e) if !is_new && e.is_not_found() => {
                    warn!("{} ({}) not found, removing from state", RESOURCE, id);
                    Ok(None)
                }
                Err(e) => Err(e.context(format!("reading {RESOURCE} ({id})"))),
            }
        }
        .instrument(span)
        .await;

        record_operation(METRIC_RESOURCE, &result, "read", start);
        result
    }

    async fn read_with_propagation(
        &self,
        id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<LoginProfile, ResourceError> {
        let api = &self.api;
        let polled = poll::until_found(
            &self.poll.with_timeout(self.timeouts.iam_propagation),
            cancel,
            1,
            move || api.get_login_profile(id),
            id,
        )
        .await;

        match polled {
            Ok(Some(profile)) => Ok(profile),
            Ok(None) => Err(ResourceError::EmptyResult {
                operation: "GetLoginProfile",
            }),
            Err(e) if e.is_timeout() => {
                debug!("{} ({}) still not visible, making a final attempt", RESOURCE, id);
                self.api.get_login_profile(id).await
            }
            Err(e) => Err(e),
        }
    }

    /// Delete the login profile. Deleting a missing profile succeeds.
    pub async fn delete(
        &self,
        id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), ResourceError> {
        let span = info_span!("iam.login_profile.delete", user.name = %id);
        let start = Instant::now();

        let result = async {
            debug!("Deleting {} ({})", RESOURCE, id);
            let api = &self.api;
            let polled = poll::poll_until(
                &self.poll.with_timeout(self.timeouts.iam_propagation),
                cancel,
                move || api.delete_login_profile(id),
                poll::from_fn(|result: Result<&(), &ResourceError>| match result {
                    Ok(_) => Decision::Satisfied,
                    Err(e) if e.is_not_found() => Decision::Satisfied,
                    Err(e) if e.is_retryable() => Decision::Retry,
                    Err(_) => Decision::Stop,
                }),
                id,
            )
            .await;

            let outcome = match polled {
                Err(e) if e.is_timeout() => {
                    debug!("{} ({}) still locked, making a final attempt", RESOURCE, id);
                    self.api.delete_login_profile(id).await
                }
                other => other.map(|_| ()),
            };

            match outcome {
                Err(e) if e.is_not_found() => Ok(()),
                other => other.map_err(|e| e.context(format!("deleting {RESOURCE} ({id})"))),
            }
        }
        .instrument(span)
        .await;

        record_operation(METRIC_RESOURCE, &result, "delete", start);
        result
    }

    /// Import an existing profile. The password was never stored, so no
    /// plaintext or encrypted copy is available afterwards.
    pub async fn import(&self, id: &str) -> Result<Option<LoginProfileState>, ResourceError> {
        let state = LoginProfileState::imported(id);
        self.read(&state, false, None).await
    }
}
