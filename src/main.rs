//! gistly - publish files and snippets as GitHub Gists
//!
//! Reads documents from the command line or piped stdin, posts them as a
//! gist, and puts the resulting URL on your clipboard.
//!
//! Available as the `gst` command.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gistly::cli::commands::{Cli, Commands};
use gistly::cli::{auth, config, create};
use gistly::core::notify;
use gistly::error::{GistlyError, Result};

#[tokio::main]
async fn main() {
    // A spawned copy of this binary may exist only to hold the clipboard
    if notify::run_clipboard_daemon() {
        return;
    }

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        handle_error(&e);
        std::process::exit(1);
    }
}

/// Report failures; the empty-publish cases only beep
fn handle_error(e: &GistlyError) {
    match e {
        // Nothing was ever going to be published, a bell is enough
        GistlyError::NoDocuments | GistlyError::NoContent => {
            eprint!("\x07");
        }
        // The user backed out on purpose
        GistlyError::Cancelled => {}
        _ => {
            eprintln!("Error: {}", e);
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Create(args) => create::handle_create(args).await,
        Commands::Auth(args) => auth::handle_auth(args.command).await,
        Commands::Config(args) => config::handle_config(args.command),
    }
}
