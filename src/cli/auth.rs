//! Authentication command handlers

use crate::cli::commands::AuthCommand;
use crate::core::config::Settings;
use crate::core::credentials::CredentialStore;
use crate::error::{GistlyError, Result};
use crate::tui::login::{self, LoginDialog, LoginOutcome};

/// Handle authentication commands
pub async fn handle_auth(command: AuthCommand) -> Result<()> {
    match command {
        AuthCommand::Login => handle_login().await,
        AuthCommand::Logout => handle_logout(),
        AuthCommand::Status => handle_status(),
    }
}

/// Handle the login command
async fn handle_login() -> Result<()> {
    let settings = Settings::load()?;
    let mut store = CredentialStore::from_settings(settings);

    if store.has_credentials()? {
        println!("✓ Already logged in to GitHub.");
        println!();
        println!("  To change accounts, first run: gst auth logout");
        return Ok(());
    }

    if !login::is_interactive() {
        return Err(GistlyError::Terminal(
            "Logging in needs an interactive terminal".to_string(),
        ));
    }

    let prefill = store.username();
    match LoginDialog::new(prefill.as_deref()).run(&mut store).await? {
        LoginOutcome::Submitted => {
            let username = store.username().unwrap_or_default();
            println!("✓ Logged in as @{}.", username);
            Ok(())
        }
        LoginOutcome::Cancelled => {
            println!("Login cancelled.");
            Ok(())
        }
    }
}

/// Handle the logout command
fn handle_logout() -> Result<()> {
    let settings = Settings::load()?;

    // Environment credentials are not ours to clear
    let mut store = CredentialStore::from_settings(settings).with_env_overrides(false);

    if store.username().is_none() {
        println!("Not currently logged in.");
        return Ok(());
    }

    store.forget()?;
    println!("Successfully logged out.");
    Ok(())
}

/// Handle the status command
fn handle_status() -> Result<()> {
    let settings = Settings::load()?;
    let mut store = CredentialStore::from_settings(settings);

    println!("Authentication Status:");
    match store.lookup()? {
        Some(credentials) if credentials.username.is_empty() => {
            println!("  GitHub: Authenticated (token from environment)");
        }
        Some(credentials) => {
            println!("  GitHub: Authenticated as @{}", credentials.username);
        }
        None => {
            println!("  GitHub: Not authenticated");
            if let Some(username) = store.username() {
                println!("  Remembered username: @{} (no stored secret)", username);
            }
        }
    }
    Ok(())
}
