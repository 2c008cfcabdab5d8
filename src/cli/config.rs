//! Configuration command handlers

use crate::cli::commands::{ConfigCommand, ConfigKey};
use crate::core::config::Settings;
use crate::error::{GistlyError, Result};

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Set { key, value } => handle_set(key, value),
        ConfigCommand::Get { key } => handle_get(key),
        ConfigCommand::Remove { key } => handle_remove(key),
    }
}

/// Handle setting a configuration value
fn handle_set(key: ConfigKey, value: String) -> Result<()> {
    let mut settings = Settings::load()?;
    match key {
        ConfigKey::GithubUsername => {
            if value.is_empty() {
                return Err(GistlyError::InvalidInput(
                    "Username cannot be empty.".to_string(),
                ));
            }
            settings.github_username = Some(value.clone());
            settings.save()?;
            println!("GitHub username set to: {}", value);
        }
        ConfigKey::OpenLinks => {
            let enabled = parse_flag(&value)?;
            settings.open_links = enabled;
            settings.save()?;
            println!("Open links after publishing: {}", flag_label(enabled));
        }
    }
    Ok(())
}

/// Handle getting a configuration value
fn handle_get(key: ConfigKey) -> Result<()> {
    let settings = Settings::load()?;
    match key {
        ConfigKey::GithubUsername => match settings.github_username {
            Some(username) => println!("GitHub username: {}", username),
            None => println!("GitHub username: Not set"),
        },
        ConfigKey::OpenLinks => {
            println!(
                "Open links after publishing: {}",
                flag_label(settings.open_links)
            );
        }
    }
    Ok(())
}

/// Handle removing a configuration value
fn handle_remove(key: ConfigKey) -> Result<()> {
    let mut settings = Settings::load()?;
    match key {
        ConfigKey::GithubUsername => {
            settings.github_username = None;
            settings.save()?;
            println!("GitHub username has been removed.");
        }
        ConfigKey::OpenLinks => {
            settings.open_links = false;
            settings.save()?;
            println!("Open links reset to default: {}", flag_label(false));
        }
    }
    Ok(())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(GistlyError::InvalidInput(format!(
            "Invalid value '{}'. Use 'true' or 'false'.",
            value
        ))),
    }
}

fn flag_label(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}
