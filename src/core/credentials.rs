//! Secure credential storage using the system keyring
//!
//! This module handles the GitHub username/password pair used to create
//! gists. The secret lives in the system keyring (macOS Keychain, Linux
//! Secret Service) under the username as account name, while the username
//! itself is remembered in the settings file. An in-memory cache minimizes
//! keychain prompts within a single run.
//!
//! ## Environment Variable Fallback
//!
//! For development and CI, you can set credentials via environment variables:
//! - `GITHUB_USER` - GitHub username
//! - `GITHUB_TOKEN` - GitHub password or personal access token
//!
//! Priority: env var > cache > keyring

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use keyring::Entry;
use secrecy::{ExposeSecret, SecretString};

use crate::core::config::Settings;
use crate::error::{GistlyError, Result};

const SERVICE_NAME: &str = "gistly";

// Environment variable names
const GITHUB_USER_ENV: &str = "GITHUB_USER";
const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

// ─────────────────────────────────────────────────────────────────────────
// Credentials
// ─────────────────────────────────────────────────────────────────────────

/// A username/secret pair ready to authenticate against GitHub
#[derive(Clone)]
pub struct Credentials {
    /// GitHub account name; may be empty when only `GITHUB_TOKEN` is set
    pub username: String,
    /// Password or personal access token
    pub password: SecretString,
}

impl Credentials {
    /// Create a credential pair
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Get a masked version of the secret for display (shows first 4 and last 4 chars)
    pub fn masked_password(&self) -> String {
        let exposed = self.password.expose_secret();
        // Counted in characters, not bytes, so multi-byte secrets never split
        let length = exposed.chars().count();
        if length <= 8 {
            "*".repeat(length)
        } else {
            let head: String = exposed.chars().take(4).collect();
            let tail: String = exposed.chars().skip(length - 4).collect();
            format!("{}...{}", head, tail)
        }
    }
}

// Manual impl so the secret never lands in logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.masked_password())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Secret Stores
// ─────────────────────────────────────────────────────────────────────────

/// Backend that holds one secret per account name
pub trait SecretStore {
    /// Fetch the secret for an account
    ///
    /// Absence is not an error: a missing entry is `Ok(None)` so the caller
    /// can decide whether to prompt for a login.
    fn get_secret(&self, account: &str) -> Result<Option<SecretString>>;

    /// Store the secret for an account, replacing any previous value
    fn set_secret(&self, account: &str, secret: &str) -> Result<()>;

    /// Remove the secret for an account; removing a missing entry is fine
    fn delete_secret(&self, account: &str) -> Result<()>;
}

/// Secret store backed by the operating system keyring
pub struct SystemKeychain;

impl SecretStore for SystemKeychain {
    fn get_secret(&self, account: &str) -> Result<Option<SecretString>> {
        let entry = Entry::new(SERVICE_NAME, account)?;
        match entry.get_password() {
            Ok(password) => Ok(Some(SecretString::from(password))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(GistlyError::Credential(format!(
                "Cannot access system keychain. Make sure your keyring is unlocked. ({})",
                e
            ))),
        }
    }

    fn set_secret(&self, account: &str, secret: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, account)?;
        entry.set_password(secret)?;
        Ok(())
    }

    fn delete_secret(&self, account: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, account)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(GistlyError::Credential(e.to_string())),
        }
    }
}

/// In-memory secret store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryKeychain {
    secrets: RwLock<HashMap<String, SecretString>>,
}

impl MemoryKeychain {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretStore for MemoryKeychain {
    fn get_secret(&self, account: &str) -> Result<Option<SecretString>> {
        let secrets = self
            .secrets
            .read()
            .map_err(|_| GistlyError::Credential("Secret store lock poisoned".into()))?;
        Ok(secrets.get(account).cloned())
    }

    fn set_secret(&self, account: &str, secret: &str) -> Result<()> {
        let mut secrets = self
            .secrets
            .write()
            .map_err(|_| GistlyError::Credential("Secret store lock poisoned".into()))?;
        secrets.insert(account.to_string(), SecretString::from(secret.to_string()));
        Ok(())
    }

    fn delete_secret(&self, account: &str) -> Result<()> {
        let mut secrets = self
            .secrets
            .write()
            .map_err(|_| GistlyError::Credential("Secret store lock poisoned".into()))?;
        secrets.remove(account);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Credential Store
// ─────────────────────────────────────────────────────────────────────────

/// Credential store tying the remembered username to its keyring secret
///
/// Owns its settings and cache rather than sharing process-wide state, so
/// every consumer receives an explicit store instance.
pub struct CredentialStore {
    settings: Settings,
    keychain: Box<dyn SecretStore>,
    cached: Option<Credentials>,
    env_overrides: bool,
}

impl CredentialStore {
    /// Create a store over the given settings and secret backend
    pub fn new(settings: Settings, keychain: Box<dyn SecretStore>) -> Self {
        Self {
            settings,
            keychain,
            cached: None,
            env_overrides: true,
        }
    }

    /// Create a store backed by the operating system keyring
    pub fn from_settings(settings: Settings) -> Self {
        Self::new(settings, Box::new(SystemKeychain))
    }

    /// Enable or disable the `GITHUB_USER`/`GITHUB_TOKEN` overrides
    pub fn with_env_overrides(mut self, enabled: bool) -> Self {
        self.env_overrides = enabled;
        self
    }

    /// The username a login dialog should prefill, if one is known
    pub fn username(&self) -> Option<String> {
        if self.env_overrides {
            if let Ok(user) = std::env::var(GITHUB_USER_ENV) {
                if !user.is_empty() {
                    return Some(user);
                }
            }
        }

        if let Some(cached) = &self.cached {
            if !cached.username.is_empty() {
                return Some(cached.username.clone());
            }
        }

        self.settings
            .github_username
            .clone()
            .filter(|u| !u.is_empty())
    }

    /// Retrieve the stored credentials
    ///
    /// Priority: environment variable > cache > keyring. Returns `Ok(None)`
    /// when no username is remembered or the keyring has no secret for it;
    /// the caller decides whether to open the login dialog. A keyring
    /// backend failure also counts as absent, so a broken keychain leads
    /// back to the login dialog instead of a dead end.
    pub fn lookup(&mut self) -> Result<Option<Credentials>> {
        // Priority 1: Check environment variables
        if self.env_overrides {
            if let Ok(token) = std::env::var(GITHUB_TOKEN_ENV) {
                if !token.is_empty() {
                    let username = self.username().unwrap_or_default();
                    return Ok(Some(Credentials::new(username, SecretString::from(token))));
                }
            }
        }

        // Priority 2: Check cache
        if let Some(cached) = &self.cached {
            return Ok(Some(cached.clone()));
        }

        // Priority 3: Fetch from keyring under the remembered username
        let Some(username) = self.username() else {
            return Ok(None);
        };

        match self.keychain.get_secret(&username) {
            Ok(Some(secret)) => {
                let credentials = Credentials::new(username, secret);
                self.cached = Some(credentials.clone());
                Ok(Some(credentials))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                tracing::warn!("keychain lookup failed: {}", e);
                Ok(None)
            }
        }
    }

    /// Check whether credentials are available without exposing them
    pub fn has_credentials(&mut self) -> Result<bool> {
        Ok(self.lookup()?.is_some())
    }

    /// Store a credential pair
    ///
    /// Writes the secret to the keyring and remembers the username in the
    /// settings file. The in-memory cache is only updated once both writes
    /// succeeded, so a failed save never fakes a logged-in state.
    pub fn save(&mut self, username: &str, password: &str) -> Result<()> {
        self.keychain.set_secret(username, password)?;

        self.settings.github_username = Some(username.to_string());
        self.settings.save()?;

        self.cached = Some(Credentials::new(
            username,
            SecretString::from(password.to_string()),
        ));

        Ok(())
    }

    /// Delete the stored credentials and forget the username
    pub fn forget(&mut self) -> Result<()> {
        let remembered = self
            .cached
            .as_ref()
            .map(|c| c.username.clone())
            .filter(|u| !u.is_empty())
            .or_else(|| self.settings.github_username.clone());

        if let Some(username) = remembered {
            self.keychain.delete_secret(&username)?;
        }

        self.cached = None;

        if self.settings.github_username.take().is_some() {
            self.settings.save()?;
        }

        Ok(())
    }
}
