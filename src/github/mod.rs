//! GitHub API integration module
//!
//! This module provides all GitHub-related functionality:
//! - Authenticated API client construction
//! - Gist creation
//! - Error classification

pub mod client;
pub mod error_handler;
pub mod gist;

pub use client::GitHubClient;
pub use error_handler::classify_github_error;
pub use gist::{CreateGistParams, CreatedGist, GistHandler, GitHubRemote};
