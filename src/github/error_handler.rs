//! GitHub API error detection and classification
//!
//! Parses octocrab errors to provide actionable user guidance instead of
//! leaking raw API responses to the terminal.

use crate::error::GistlyError;

/// Classifies an octocrab error into a more specific GistlyError if possible
///
/// This function examines the error message to detect specific error
/// conditions like rejected credentials (401) or rate limiting (403).
pub fn classify_github_error(err: octocrab::Error) -> GistlyError {
    // Get the error message using Debug format (Display only returns "GitHub")
    let error_message = format!("{:?}", err);

    // Check for rejected credentials (401)
    if is_bad_credentials_error(&error_message) {
        return GistlyError::AuthenticationFailed(
            "GitHub rejected the stored username/password.".to_string(),
        );
    }

    // Check for rate limiting
    if is_rate_limit_error(&error_message) {
        return GistlyError::GitHubApi(
            "API rate limit exceeded. Please wait a few minutes and try again.".to_string(),
        );
    }

    // Check for a rejected payload (422)
    if is_unprocessable_error(&error_message) {
        return GistlyError::GitHubApi(
            "GitHub rejected the gist contents. One of the files may be invalid.".to_string(),
        );
    }

    // Default: return as generic GitHub API error
    GistlyError::GitHubApi(error_message)
}

/// Check if error is a 401 with rejected credentials
fn is_bad_credentials_error(error_message: &str) -> bool {
    error_message.contains("Bad credentials")
        || error_message.contains("Requires authentication")
        || error_message.contains("401")
}

/// Check if error is a rate limit error
fn is_rate_limit_error(error_message: &str) -> bool {
    error_message.contains("rate limit")
        || (error_message.contains("403") && error_message.contains("limit exceeded"))
}

/// Check if error is a 422 validation failure
fn is_unprocessable_error(error_message: &str) -> bool {
    error_message.contains("422") || error_message.contains("Validation Failed")
}
