//! CLI command definitions using clap
//!
//! Defines the command structure for the `gst` CLI tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::documents::DocumentSelection;

/// gistly - publish files and snippets as GitHub Gists
///
/// Turns files or piped text into a gist and puts the URL on your
/// clipboard.
#[derive(Parser, Debug)]
#[command(name = "gst", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a gist from files or piped text
    Create(CreateArgs),

    /// Authenticate with GitHub
    Auth(AuthArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Create Command
// ─────────────────────────────────────────────────────────────────────────────

/// Gist creation arguments
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Files to publish; use '-' for piped stdin
    pub paths: Vec<PathBuf>,

    /// Create a secret gist instead of a public one
    #[arg(long)]
    pub private: bool,

    /// Which documents to publish (defaults to 'selected' when paths are
    /// given, 'current' otherwise)
    #[arg(long, value_enum)]
    pub from: Option<Source>,

    /// Description shown on the gist page
    #[arg(long, short)]
    pub description: Option<String>,

    /// Name for the piped stdin document
    #[arg(long)]
    pub filename: Option<String>,

    /// Open the gist in the browser after publishing
    #[arg(long)]
    pub open: bool,
}

/// Which documents a publish picks up
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Source {
    /// The document in focus: piped stdin, or the first path
    Current,
    /// Exactly the documents named on the command line
    Selected,
    /// Every opened document
    Active,
}

impl Source {
    pub fn to_selection(self) -> DocumentSelection {
        match self {
            Source::Current => DocumentSelection::Current,
            Source::Selected => DocumentSelection::Selected,
            Source::Active => DocumentSelection::Active,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Authentication commands
#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Store GitHub credentials in the system keychain
    Login,
    /// Remove stored credentials
    Logout,
    /// Show current authentication status
    Status,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key
        key: ConfigKey,

        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: ConfigKey,
    },

    /// Remove a configuration value
    Remove {
        /// Configuration key
        key: ConfigKey,
    },
}

/// Available configuration keys
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ConfigKey {
    /// GitHub username the secret is stored under
    #[value(name = "github-username")]
    GithubUsername,

    /// Open gists in the browser after publishing
    #[value(name = "open-links")]
    OpenLinks,
}
