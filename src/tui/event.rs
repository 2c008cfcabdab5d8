//! Event handling for the login dialog

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

/// Events the dialog reacts to
#[derive(Debug, Clone)]
pub enum DialogEvent {
    /// Keyboard event
    Key(KeyEvent),
    /// Terminal resize
    Resize,
}

/// Streams terminal events into the async dialog loop
pub struct EventPump {
    rx: mpsc::Receiver<DialogEvent>,
    /// Handle to the polling task for cleanup
    _task: tokio::task::JoinHandle<()>,
}

impl EventPump {
    /// Spawn the blocking poll loop feeding the dialog
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(100);

        let task = tokio::task::spawn_blocking(move || loop {
            // Poll with a timeout so a dropped receiver is noticed
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => {}
                Ok(false) => {
                    if tx.is_closed() {
                        break;
                    }
                    continue;
                }
                Err(_) => break,
            }

            let dialog_event = match event::read() {
                // Windows also reports Release/Repeat; only react to presses
                Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    Some(DialogEvent::Key(key))
                }
                Ok(CrosstermEvent::Resize(_, _)) => Some(DialogEvent::Resize),
                Ok(_) => None,
                Err(_) => break,
            };

            if let Some(evt) = dialog_event {
                if tx.blocking_send(evt).is_err() {
                    break;
                }
            }
        });

        Self { rx, _task: task }
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<DialogEvent> {
        self.rx.recv().await
    }
}
