//! # PGP Encryption
//!
//! Encrypts generated passwords for a PGP public key so the plaintext never
//! has to be stored.
//!
//! The key is given either as `keybase:<username>` (looked up through the
//! Keybase API) or as a base64-encoded public key. Encryption shells out to
//! `gpg` with a throwaway keyring (`GNUPGHOME` in a temporary directory that
//! is removed on drop). The result is the base64 of the binary PGP message,
//! together with the fingerprint of the key that was used.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::constants::KEYBASE_LOOKUP_URL;
use crate::error::ResourceError;

/// Where the public key comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PgpKeySource {
    /// `keybase:<username>`
    Keybase(String),
    /// Base64-encoded public key
    Inline(String),
}

impl PgpKeySource {
    pub fn parse(value: &str) -> Self {
        match value.strip_prefix("keybase:") {
            Some(user) => PgpKeySource::Keybase(user.to_string()),
            None => PgpKeySource::Inline(value.trim().to_string()),
        }
    }
}

/// An encrypted value and the key it was encrypted for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedValue {
    pub key_fingerprint: String,
    /// Base64 of the binary PGP message
    pub ciphertext: String,
}

/// Encrypts a secret for a PGP key
#[async_trait]
pub trait ValueEncryptor: Send + Sync {
    /// `description` names the value in errors (e.g. "Password")
    async fn encrypt(
        &self,
        pgp_key: &str,
        value: &str,
        description: &str,
    ) -> Result<EncryptedValue, ResourceError>;
}

fn encryption_error(context: &str, e: impl std::fmt::Display) -> ResourceError {
    ResourceError::Encryption(format!("{context}: {e}"))
}

#[derive(Debug, Deserialize)]
struct KeybaseLookup {
    #[serde(default)]
    them: Vec<Option<KeybaseUser>>,
}

#[derive(Debug, Deserialize)]
struct KeybaseUser {
    public_keys: KeybasePublicKeys,
}

#[derive(Debug, Deserialize)]
struct KeybasePublicKeys {
    primary: KeybaseKey,
}

#[derive(Debug, Deserialize)]
struct KeybaseKey {
    bundle: String,
}

/// `gpg`-backed encryptor
#[derive(Debug, Clone)]
pub struct GpgEncryptor {
    http: reqwest::Client,
    keybase_url: String,
}

impl Default for GpgEncryptor {
    fn default() -> Self {
        Self::new(reqwest::Client::new(), KEYBASE_LOOKUP_URL)
    }
}

impl GpgEncryptor {
    pub fn new(http: reqwest::Client, keybase_url: impl Into<String>) -> Self {
        Self {
            http,
            keybase_url: keybase_url.into(),
        }
    }

    /// Fetch the key material: armored for Keybase, binary for inline keys
    pub async fn retrieve_key(&self, source: &PgpKeySource) -> Result<Vec<u8>, ResourceError> {
        match source {
            PgpKeySource::Keybase(user) => {
                info!("Fetching PGP key for keybase user {}", user);
                let lookup: KeybaseLookup = self
                    .http
                    .get(&self.keybase_url)
                    .query(&[("usernames", user.as_str()), ("fields", "public_keys")])
                    .send()
                    .await
                    .and_then(reqwest::Response::error_for_status)
                    .map_err(|e| encryption_error("fetching PGP key from keybase", e))?
                    .json()
                    .await
                    .map_err(|e| encryption_error("decoding keybase response", e))?;

                lookup
                    .them
                    .into_iter()
                    .flatten()
                    .next()
                    .map(|u| u.public_keys.primary.bundle.into_bytes())
                    .ok_or_else(|| {
                        ResourceError::Encryption(format!("keybase user {user} has no public key"))
                    })
            }
            PgpKeySource::Inline(encoded) => decode_inline_key(encoded),
        }
    }
}

fn decode_inline_key(encoded: &str) -> Result<Vec<u8>, ResourceError> {
    STANDARD
        .decode(encoded)
        .map_err(|e| encryption_error("decoding base64 PGP key", e))
}

#[async_trait]
impl ValueEncryptor for GpgEncryptor {
    async fn encrypt(
        &self,
        pgp_key: &str,
        value: &str,
        description: &str,
    ) -> Result<EncryptedValue, ResourceError> {
        let key = self.retrieve_key(&PgpKeySource::parse(pgp_key)).await?;

        let gpg_path = which::which("gpg").map_err(|e| encryption_error("locating gpg", e))?;
        let gpg_home = tempfile::Builder::new()
            .prefix("gpg-home-")
            .tempdir()
            .map_err(|e| encryption_error("creating temporary GPG home", e))?;

        run_gpg(&gpg_path, gpg_home.path(), &["--import"], &key)
            .await
            .map_err(|e| encryption_error("importing PGP key", e))?;

        let listing = run_gpg(
            &gpg_path,
            gpg_home.path(),
            &["--with-colons", "--fingerprint"],
            &[],
        )
        .await
        .map_err(|e| encryption_error("listing PGP keys", e))?;
        let fingerprint = parse_fingerprint(&String::from_utf8_lossy(&listing))
            .ok_or_else(|| ResourceError::Encryption("no fingerprint in imported key".into()))?;
        debug!(fingerprint = %fingerprint, "Imported PGP key");

        let ciphertext = run_gpg(
            &gpg_path,
            gpg_home.path(),
            &["--trust-model", "always", "--recipient", &fingerprint, "--encrypt"],
            value.as_bytes(),
        )
        .await
        .map_err(|e| encryption_error(&format!("encrypting {description}"), e))?;

        Ok(EncryptedValue {
            key_fingerprint: fingerprint,
            ciphertext: STANDARD.encode(ciphertext),
        })
    }
}

/// Run gpg in batch mode against `home`, feeding `input` on stdin
async fn run_gpg(
    gpg_path: &Path,
    home: &Path,
    args: &[&str],
    input: &[u8],
) -> Result<Vec<u8>, String> {
    let mut command = tokio::process::Command::new(gpg_path);
    command
        .env("GNUPGHOME", home)
        .arg("--batch")
        .arg("--yes")
        .arg("--no-tty")
        .args(args);
    run_piped(command, input, "gpg").await
}

/// Run `command` with piped stdio and return its stdout.
///
/// Stdin is written while stdout and stderr are drained, so a child that
/// produces output before consuming all of its input cannot block.
async fn run_piped(
    mut command: tokio::process::Command,
    input: &[u8],
    name: &str,
) -> Result<Vec<u8>, String> {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| format!("failed to spawn {name}: {e}"))?;

    let stdin = child.stdin.take();
    let write = async move {
        if let Some(mut stdin) = stdin {
            stdin.write_all(input).await?;
            stdin.shutdown().await?;
        }
        Ok::<_, std::io::Error>(())
    };
    let (written, output) = tokio::join!(write, child.wait_with_output());

    let output = output.map_err(|e| format!("failed to wait for {name}: {e}"))?;
    if !output.status.success() {
        return Err(format!(
            "{name} exited with status {}: {}",
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }
    written.map_err(|e| format!("failed to write to {name} stdin: {e}"))?;
    Ok(output.stdout)
}

/// First primary key fingerprint in `gpg --with-colons` output
fn parse_fingerprint(listing: &str) -> Option<String> {
    listing
        .lines()
        .filter(|line| line.starts_with("fpr:"))
        .find_map(|line| line.split(':').nth(9))
        .filter(|fpr| !fpr.is_empty())
        .map(str::to_lowercase)
}
