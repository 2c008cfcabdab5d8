//! Publish result announcements
//!
//! After a gist is created its URL is copied to the clipboard and announced
//! with a desktop notification. When no notification mechanism is available
//! the announcement falls back to plain terminal output, so the URL is
//! never silently lost. On Linux the clipboard contents are kept alive by a
//! detached copy of the binary, since the selection dies with its owner.

use std::process::Command;

use crate::core::documents::Visibility;

/// Sentence appended to notifications once the URL is on the clipboard
pub const CLIPBOARD_BODY: &str = "The URL has been copied to your clipboard.";

/// Argv marker for the spawned process that keeps the clipboard alive
#[cfg(target_os = "linux")]
pub const CLIPBOARD_DAEMON_ARG: &str = "__clipboard-daemon";

/// Announces publish results to the user
pub trait ResultNotifier {
    /// Announce a published gist URL
    fn notify(&self, url: &str, visibility: Visibility);
}

/// Platform side effects behind the notifier
pub trait DesktopActions {
    /// Put text on the system clipboard
    fn set_clipboard(&self, text: &str) -> bool;

    /// Show a desktop notification
    fn show_notification(&self, title: &str, subtitle: &str, body: &str) -> bool;
}

/// The real clipboard and notification commands
pub struct SystemActions;

impl DesktopActions for SystemActions {
    fn set_clipboard(&self, text: &str) -> bool {
        copy_to_clipboard(text)
    }

    fn show_notification(&self, title: &str, subtitle: &str, body: &str) -> bool {
        send_desktop_notification(title, subtitle, body)
    }
}

/// Notifier using the clipboard plus the platform notification command
pub struct DesktopNotifier {
    actions: Box<dyn DesktopActions>,
}

impl DesktopNotifier {
    /// Create a notifier over the real platform actions
    pub fn new() -> Self {
        Self::with_actions(Box::new(SystemActions))
    }

    /// Create a notifier over the given actions
    pub fn with_actions(actions: Box<dyn DesktopActions>) -> Self {
        Self { actions }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultNotifier for DesktopNotifier {
    fn notify(&self, url: &str, visibility: Visibility) {
        // Clipboard first: the URL must be usable even if notifications fail
        let copied = self.actions.set_clipboard(url);

        let title = notification_title(visibility);
        let body = if copied { CLIPBOARD_BODY } else { "" };

        if !self.actions.show_notification(&title, url, body) {
            eprintln!("✓ {}", title);
            eprintln!("  {}", url);
            if copied {
                eprintln!("  {}", CLIPBOARD_BODY);
            }
        }
    }
}

/// Title announcing a published gist
fn notification_title(visibility: Visibility) -> String {
    format!("{} Gist Created", visibility.label())
}

/// Serve the clipboard holder role when invoked for it
///
/// Returns true when this process was spawned with `CLIPBOARD_DAEMON_ARG`,
/// in which case it has already done its job and the caller should exit
/// without touching the CLI.
pub fn run_clipboard_daemon() -> bool {
    #[cfg(target_os = "linux")]
    {
        use std::ffi::OsStr;

        let mut args = std::env::args_os().skip(1);
        if args.next().as_deref() != Some(OsStr::new(CLIPBOARD_DAEMON_ARG)) {
            return false;
        }
        if let Some(text) = args.next().as_ref().and_then(|text| text.to_str()) {
            if let Err(e) = hold_clipboard(text) {
                tracing::warn!("clipboard holder failed: {}", e);
            }
        }
        true
    }
    #[cfg(not(target_os = "linux"))]
    {
        false
    }
}

/// Own the clipboard selection until another application takes it over
#[cfg(target_os = "linux")]
fn hold_clipboard(text: &str) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    arboard::Clipboard::new()?.set().wait().text(text)
}

/// Launch the detached process that owns the clipboard selection
#[cfg(target_os = "linux")]
fn spawn_clipboard_daemon(text: &str) -> std::io::Result<()> {
    use std::process::Stdio;

    Command::new(std::env::current_exe()?)
        .arg(CLIPBOARD_DAEMON_ARG)
        .arg(text)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .current_dir("/")
        .spawn()?;
    Ok(())
}

/// Copy text to the system clipboard
///
/// Returns true if the clipboard accepted the text, false otherwise. On
/// Linux the contents are handed to a spawned holder process, since the
/// selection only lives as long as its owner.
fn copy_to_clipboard(text: &str) -> bool {
    #[cfg(target_os = "linux")]
    {
        // No display connection means no clipboard to hand the contents to
        if let Err(e) = arboard::Clipboard::new() {
            tracing::warn!("clipboard unavailable: {}", e);
            return false;
        }
        match spawn_clipboard_daemon(text) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("clipboard holder failed to start: {}", e);
                false
            }
        }
    }
    #[cfg(not(target_os = "linux"))]
    {
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string())) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("clipboard copy failed: {}", e);
                false
            }
        }
    }
}

/// Attempt to show a desktop notification
///
/// Returns true if the notification command was successfully launched,
/// false otherwise.
#[allow(unused_variables)]
fn send_desktop_notification(title: &str, subtitle: &str, body: &str) -> bool {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "{}" subtitle "{}""#,
            escape_applescript(body),
            escape_applescript(title),
            escape_applescript(subtitle)
        );
        Command::new("osascript").args(["-e", &script]).spawn().is_ok()
    }
    #[cfg(target_os = "linux")]
    {
        let text = if body.is_empty() {
            subtitle.to_string()
        } else {
            format!("{}\n{}", subtitle, body)
        };
        Command::new("notify-send").arg(title).arg(text).spawn().is_ok()
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        false
    }
}

/// Escape text for interpolation into an AppleScript string literal
#[cfg(target_os = "macos")]
fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Attempt to open a URL in the default browser
///
/// Returns true if the browser was successfully launched, false otherwise.
#[allow(unused_variables)]
pub fn open_browser(url: &str) -> bool {
    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(url).spawn().is_ok()
    }
    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(url).spawn().is_ok()
    }
    #[cfg(target_os = "windows")]
    {
        Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .is_ok()
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        false
    }
}
