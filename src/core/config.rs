//! Application settings management
//!
//! Handles loading and saving persistent settings including:
//! - The GitHub username the secret is stored under
//! - Other user preferences

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{GistlyError, Result};

/// Persistent application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// GitHub username remembered across sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,

    /// Open the gist in a browser after publishing
    #[serde(default)]
    pub open_links: bool,

    /// File this instance was loaded from; empty for in-memory defaults
    #[serde(skip)]
    path: PathBuf,
}

impl Settings {
    /// Load settings from the default location, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(Self::settings_path()?)
    }

    /// Load settings from a specific file, or create default if not exists
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let mut settings = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            toml::from_str::<Settings>(&contents)?
        } else {
            Settings::default()
        };

        settings.path = path;
        Ok(settings)
    }

    /// Save settings back to the file they were loaded from
    pub fn save(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(GistlyError::Config(
                "Settings were not loaded from a file".into(),
            ));
        }

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&self.path, contents)?;

        Ok(())
    }

    /// Get the settings file path
    pub fn settings_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "gistly", "gistly")
            .ok_or_else(|| GistlyError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }
}
