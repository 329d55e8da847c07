//! # Test Fakes
//!
//! Scripted in-memory implementations of the provider traits and the value
//! encryptor, shared by the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use aws_resource_manager::config::{AwsSettings, HandlerConfig, PollConfig, TimeoutConfig};
use aws_resource_manager::encryption::{EncryptedValue, ValueEncryptor};
use aws_resource_manager::model::{ContactDetails, ContactType, LoginProfile};
use aws_resource_manager::provider::{AlternateContactApi, LoginProfileApi};
use aws_resource_manager::ResourceError;

/// One scripted API answer
#[derive(Debug, Clone)]
pub enum Step<T> {
    Found(T),
    NotFound,
    Throttled,
    Locked,
    Denied,
}

impl<T: Clone> Step<T> {
    fn to_result(&self) -> Result<T, ResourceError> {
        match self {
            Step::Found(value) => Ok(value.clone()),
            Step::NotFound => Err(ResourceError::NotFound {
                resource: "test resource",
                id: "test".to_string(),
            }),
            Step::Throttled => Err(ResourceError::Transient {
                code: Some("ThrottlingException".to_string()),
                message: "Rate exceeded".to_string(),
            }),
            Step::Locked => Err(ResourceError::Transient {
                code: Some("EntityTemporarilyUnmodifiable".to_string()),
                message: "Login Profile cannot be modified while login profile is being created."
                    .to_string(),
            }),
            Step::Denied => Err(ResourceError::Api {
                code: Some("AccessDeniedException".to_string()),
                message: "not authorized".to_string(),
            }),
        }
    }
}

/// Answers in order; the last answer repeats forever
#[derive(Debug)]
pub struct Script<T> {
    steps: Mutex<VecDeque<Step<T>>>,
    calls: AtomicU32,
}

impl<T: Clone> Script<T> {
    pub fn new(steps: impl IntoIterator<Item = Step<T>>) -> Self {
        let steps: VecDeque<_> = steps.into_iter().collect();
        assert!(!steps.is_empty(), "a script needs at least one step");
        Self {
            steps: Mutex::new(steps),
            calls: AtomicU32::new(0),
        }
    }

    pub fn next(&self) -> Result<T, ResourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut steps = self.steps.lock().unwrap();
        let step = if steps.len() > 1 {
            steps.pop_front().unwrap()
        } else {
            steps.front().cloned().unwrap()
        };
        step.to_result()
    }

    /// Replace the remaining answers
    pub fn set(&self, steps: impl IntoIterator<Item = Step<T>>) {
        let mut current = self.steps.lock().unwrap();
        *current = steps.into_iter().collect();
        assert!(!current.is_empty(), "a script needs at least one step");
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Poll settings that keep paused-time tests short
pub fn fast_poll(timeout: Duration) -> PollConfig {
    PollConfig {
        min_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(40),
        timeout,
        jitter: false,
        found_streak: 2,
    }
}

pub fn test_config() -> HandlerConfig {
    HandlerConfig {
        timeouts: TimeoutConfig {
            alternate_contact_create: Duration::from_secs(2),
            alternate_contact_update: Duration::from_secs(2),
            alternate_contact_delete: Duration::from_secs(2),
            iam_propagation: Duration::from_secs(2),
        },
        poll: fast_poll(Duration::from_secs(60)),
        aws: AwsSettings::default(),
    }
}

pub fn contact(email: &str, name: &str, phone: &str, title: &str) -> ContactDetails {
    ContactDetails {
        email_address: email.to_string(),
        name: name.to_string(),
        phone_number: phone.to_string(),
        title: title.to_string(),
    }
}

/// Fake Account API
#[derive(Debug)]
pub struct FakeAccountApi {
    pub get: Script<ContactDetails>,
    pub put: Script<()>,
    pub delete: Script<()>,
    pub put_calls: Mutex<Vec<(Option<String>, ContactType, ContactDetails)>>,
    pub delete_calls: Mutex<Vec<(Option<String>, ContactType)>>,
    pub get_accounts: Mutex<Vec<Option<String>>>,
}

impl FakeAccountApi {
    pub fn new(get: impl IntoIterator<Item = Step<ContactDetails>>) -> Self {
        Self {
            get: Script::new(get),
            put: Script::new([Step::Found(())]),
            delete: Script::new([Step::Found(())]),
            put_calls: Mutex::new(Vec::new()),
            delete_calls: Mutex::new(Vec::new()),
            get_accounts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AlternateContactApi for FakeAccountApi {
    async fn put_alternate_contact(
        &self,
        account_id: Option<&str>,
        contact_type: ContactType,
        details: &ContactDetails,
    ) -> Result<(), ResourceError> {
        self.put_calls.lock().unwrap().push((
            account_id.map(ToString::to_string),
            contact_type,
            details.clone(),
        ));
        self.put.next()
    }

    async fn get_alternate_contact(
        &self,
        account_id: Option<&str>,
        _contact_type: ContactType,
    ) -> Result<ContactDetails, ResourceError> {
        self.get_accounts
            .lock()
            .unwrap()
            .push(account_id.map(ToString::to_string));
        self.get.next()
    }

    async fn delete_alternate_contact(
        &self,
        account_id: Option<&str>,
        contact_type: ContactType,
    ) -> Result<(), ResourceError> {
        self.delete_calls
            .lock()
            .unwrap()
            .push((account_id.map(ToString::to_string), contact_type));
        self.delete.next()
    }
}

/// Fake IAM API
#[derive(Debug)]
pub struct FakeIamApi {
    pub create: Script<()>,
    pub get: Script<LoginProfile>,
    pub delete: Script<()>,
    /// (user, password, reset required)
    pub create_calls: Mutex<Vec<(String, String, bool)>>,
}

impl FakeIamApi {
    pub fn new() -> Self {
        Self {
            create: Script::new([Step::Found(())]),
            get: Script::new([Step::NotFound]),
            delete: Script::new([Step::Found(())]),
            create_calls: Mutex::new(Vec::new()),
        }
    }
}

pub fn profile(user: &str, reset: bool) -> LoginProfile {
    LoginProfile {
        user_name: user.to_string(),
        password_reset_required: reset,
    }
}

#[async_trait]
impl LoginProfileApi for FakeIamApi {
    async fn create_login_profile(
        &self,
        user_name: &str,
        password: &str,
        password_reset_required: bool,
    ) -> Result<LoginProfile, ResourceError> {
        self.create_calls.lock().unwrap().push((
            user_name.to_string(),
            password.to_string(),
            password_reset_required,
        ));
        self.create
            .next()
            .map(|()| profile(user_name, password_reset_required))
    }

    async fn get_login_profile(&self, _user_name: &str) -> Result<LoginProfile, ResourceError> {
        self.get.next()
    }

    async fn delete_login_profile(&self, _user_name: &str) -> Result<(), ResourceError> {
        self.delete.next()
    }
}

/// Encryptor that tags values instead of running gpg
#[derive(Debug, Default)]
pub struct FakeEncryptor {
    pub fail: bool,
    /// (pgp key, plaintext)
    pub calls: Mutex<Vec<(String, String)>>,
}

pub const FAKE_FINGERPRINT: &str = "1234567890abcdef1234567890abcdef12345678";

#[async_trait]
impl ValueEncryptor for FakeEncryptor {
    async fn encrypt(
        &self,
        pgp_key: &str,
        value: &str,
        description: &str,
    ) -> Result<EncryptedValue, ResourceError> {
        self.calls
            .lock()
            .unwrap()
            .push((pgp_key.to_string(), value.to_string()));
        if self.fail {
            return Err(ResourceError::Encryption(format!(
                "encrypting {description}: gpg exited with status 2"
            )));
        }
        Ok(EncryptedValue {
            key_fingerprint: FAKE_FINGERPRINT.to_string(),
            ciphertext: format!("pgp({value})"),
        })
    }
}
