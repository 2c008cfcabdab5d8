//! Custom error types for gistly
//!
//! User-friendly error messages for all failure scenarios.

use thiserror::Error;

/// Main error type for the gistly application
#[derive(Error, Debug)]
pub enum GistlyError {
    /// Publish was requested with no documents at all
    #[error("Nothing to publish - no documents were provided.")]
    NoDocuments,

    /// Documents were provided but every one of them was empty
    #[error("Nothing to publish - all provided documents are empty.")]
    NoContent,

    /// User is not authenticated
    #[error("You are not logged in to GitHub.\n\n  → Run 'gst auth login' to store your credentials.")]
    NotAuthenticated,

    /// GitHub rejected the stored credentials
    #[error("GitHub authentication failed: {0}\n\n  → Run 'gst auth login' to update your credentials.")]
    AuthenticationFailed(String),

    /// GitHub API error
    #[error("GitHub API request failed: {0}\n\n  → Check your internet connection.\n  → Your credentials may have expired - try 'gst auth logout' then 'gst auth login'.")]
    GitHubApi(String),

    /// A publish is already waiting on the login dialog
    #[error("A publish is already in progress.\n\n  → Finish or cancel the pending login first.")]
    PublishInProgress,

    /// Credential storage error
    #[error("Cannot access secure storage: {0}\n\n  → On macOS: Make sure Keychain Access is available.\n  → On Linux: Ensure a secret service (like gnome-keyring) is running.")]
    Credential(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// Terminal/TUI error
    #[error("Terminal error: {0}\n\n  → Try resizing your terminal or restarting it.")]
    Terminal(String),

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),

    /// Operation cancelled by user
    #[error("Operation cancelled.")]
    Cancelled,

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl From<keyring::Error> for GistlyError {
    fn from(err: keyring::Error) -> Self {
        GistlyError::Credential(err.to_string())
    }
}

impl From<toml::de::Error> for GistlyError {
    fn from(err: toml::de::Error) -> Self {
        GistlyError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for GistlyError {
    fn from(err: toml::ser::Error) -> Self {
        GistlyError::Toml(err.to_string())
    }
}

impl From<octocrab::Error> for GistlyError {
    fn from(err: octocrab::Error) -> Self {
        // Use the error handler to classify and provide actionable guidance
        crate::github::error_handler::classify_github_error(err)
    }
}

/// Result type alias using GistlyError
pub type Result<T> = std::result::Result<T, GistlyError>;
