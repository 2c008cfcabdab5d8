//! Core functionality for gistly
//!
//! This module contains shared business logic including:
//! - Document collection and selection
//! - Credential management
//! - The publishing pipeline
//! - Result notifications
//! - Application configuration

pub mod config;
pub mod credentials;
pub mod documents;
pub mod login;
pub mod notify;
pub mod publisher;
pub mod workspace;

pub use config::Settings;
pub use credentials::CredentialStore;
pub use documents::{DocumentRef, DocumentSelection, Visibility};
pub use publisher::{GistPublisher, PublishOutcome};
pub use workspace::Workspace;
