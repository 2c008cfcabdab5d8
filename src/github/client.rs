//! GitHub API client wrapper using octocrab

use octocrab::Octocrab;
use secrecy::ExposeSecret;

use crate::core::credentials::Credentials;
use crate::error::Result;

/// GitHub API client wrapper
///
/// Built per request from an explicit credential pair instead of shared
/// process state, so callers control exactly which identity is used.
pub struct GitHubClient {
    /// The octocrab instance
    inner: Octocrab,
}

impl GitHubClient {
    /// Create a client authenticated with the given credentials
    ///
    /// A pair with a username authenticates with HTTP basic auth. A bare
    /// secret (e.g. `GITHUB_TOKEN` set without `GITHUB_USER`) is sent as a
    /// personal access token instead.
    pub fn with_credentials(credentials: &Credentials) -> Result<Self> {
        let builder = Octocrab::builder();

        let octocrab = if credentials.username.is_empty() {
            builder
                .personal_token(credentials.password.expose_secret().to_string())
                .build()?
        } else {
            builder
                .basic_auth(
                    credentials.username.clone(),
                    credentials.password.expose_secret().to_string(),
                )
                .build()?
        };

        Ok(Self { inner: octocrab })
    }

    /// Get the inner octocrab instance
    pub fn octocrab(&self) -> &Octocrab {
        &self.inner
    }
}
