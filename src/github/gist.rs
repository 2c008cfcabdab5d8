//! Gist operations

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::credentials::Credentials;
use crate::core::documents::Visibility;
use crate::core::publisher::GistRemote;
use crate::error::Result;
use crate::github::client::GitHubClient;

/// Parameters for creating a gist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGistParams {
    /// Whether the gist is public or secret
    pub visibility: Visibility,
    /// Description shown on the gist page; may be empty
    pub description: String,
    /// File name to content, as it will appear in the gist
    pub files: BTreeMap<String, String>,
}

/// A gist as returned by the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedGist {
    /// Unique gist ID
    pub id: String,
    /// Web URL of the gist; GitHub may omit it
    #[serde(default)]
    pub html_url: Option<String>,
}

// Wire format for POST /gists
#[derive(Serialize)]
struct CreateGistBody<'a> {
    description: &'a str,
    public: bool,
    files: BTreeMap<&'a str, GistFileBody<'a>>,
}

#[derive(Serialize)]
struct GistFileBody<'a> {
    content: &'a str,
}

fn wire_body(params: &CreateGistParams) -> CreateGistBody<'_> {
    CreateGistBody {
        description: &params.description,
        public: params.visibility.is_public(),
        files: params
            .files
            .iter()
            .map(|(name, content)| (name.as_str(), GistFileBody { content }))
            .collect(),
    }
}

/// Handler for gist operations
pub struct GistHandler<'a> {
    client: &'a GitHubClient,
}

impl<'a> GistHandler<'a> {
    /// Create a new gist handler
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Create a gist from the given parameters
    pub async fn create(&self, params: &CreateGistParams) -> Result<CreatedGist> {
        let body = wire_body(params);

        let created: CreatedGist = self.client.octocrab().post("/gists", Some(&body)).await?;

        tracing::debug!("created gist {}", created.id);
        Ok(created)
    }
}

/// Remote backed by the real GitHub API
///
/// Builds a fresh authenticated client per call so credentials entered
/// moments ago in the login dialog are picked up immediately.
pub struct GitHubRemote;

impl GistRemote for GitHubRemote {
    async fn create_gist(
        &self,
        credentials: &Credentials,
        params: &CreateGistParams,
    ) -> Result<CreatedGist> {
        let client = GitHubClient::with_credentials(credentials)?;
        GistHandler::new(&client).create(params).await
    }
}
