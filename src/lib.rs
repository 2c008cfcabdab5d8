//! gistly - publish files and snippets as GitHub Gists
//!
//! This library provides the publishing pipeline behind the `gst` CLI:
//! document collection, credential storage, gist creation through the
//! GitHub API, and the login dialog shown when credentials are missing.

pub mod cli;
pub mod core;
pub mod error;
pub mod github;
pub mod tui;

pub use error::{GistlyError, Result};
