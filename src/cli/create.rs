//! Gist creation command handler

use std::io::{self, Read};

use crossterm::tty::IsTty;
use url::Url;

use crate::cli::commands::CreateArgs;
use crate::core::config::Settings;
use crate::core::credentials::CredentialStore;
use crate::core::documents::{DocumentSelection, Visibility};
use crate::core::notify::{open_browser, DesktopNotifier};
use crate::core::publisher::{GistPublisher, PublishOutcome};
use crate::core::workspace::{Workspace, STDIN_PATH};
use crate::error::{GistlyError, Result};
use crate::github::gist::{CreatedGist, GitHubRemote};
use crate::tui::login::{self, LoginDialog, LoginOutcome};

/// Handle the create command
pub async fn handle_create(args: CreateArgs) -> Result<()> {
    let visibility = if args.private {
        Visibility::Private
    } else {
        Visibility::Public
    };

    let selection = match args.from {
        Some(source) => source.to_selection(),
        None if args.paths.is_empty() => DocumentSelection::Current,
        None => DocumentSelection::Selected,
    };

    let workspace = open_workspace(&args)?;
    let documents = selection.resolve(&workspace);

    let settings = Settings::load()?;
    let open_links = args.open || settings.open_links;

    let store = CredentialStore::from_settings(settings);
    let mut publisher = GistPublisher::new(store, GitHubRemote, DesktopNotifier::new())
        .with_description(args.description.unwrap_or_default());

    match publisher.publish(visibility, documents).await? {
        PublishOutcome::Published(gist) => finish(&gist, open_links),
        PublishOutcome::CredentialsRequired(pending) => {
            // Publishing paused until the user logs in
            if !login::is_interactive() {
                publisher.abandon(pending);
                return Err(GistlyError::NotAuthenticated);
            }

            let prefill = publisher.credentials().username();
            match LoginDialog::new(prefill.as_deref())
                .run(publisher.credentials_mut())
                .await?
            {
                LoginOutcome::Submitted => {
                    let gist = publisher.resume(pending).await?;
                    finish(&gist, open_links)
                }
                LoginOutcome::Cancelled => {
                    publisher.abandon(pending);
                    Err(GistlyError::Cancelled)
                }
            }
        }
    }
}

/// Read the named files plus any piped stdin into a workspace
fn open_workspace(args: &CreateArgs) -> Result<Workspace> {
    let wants_stdin = args.paths.iter().any(|p| p.as_os_str() == STDIN_PATH);

    let stdin = if wants_stdin || !io::stdin().is_tty() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Some(buffer)
    } else {
        None
    };

    Workspace::open(&args.paths, stdin, args.filename.clone())
}

/// Print the gist URL and open it when configured to
fn finish(gist: &CreatedGist, open_links: bool) -> Result<()> {
    match gist.html_url.as_deref().filter(|u| !u.is_empty()) {
        Some(link) => {
            println!("{}", link);
            if open_links {
                // The link gets handed to an OS command, so parse it first
                match Url::parse(link) {
                    Ok(_) => {
                        if !open_browser(link) {
                            tracing::warn!("could not open a browser for {}", link);
                        }
                    }
                    Err(e) => tracing::warn!("refusing to open '{}': {}", link, e),
                }
            }
        }
        None => {
            tracing::debug!("gist {} created without a web URL", gist.id);
        }
    }
    Ok(())
}
