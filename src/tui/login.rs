//! Interactive login dialog
//!
//! Full-screen modal asking for a GitHub username and password. The field
//! values, validation and storage live in [`LoginPrompt`]; this module only
//! drives the terminal and translates key presses.

use std::io::{self, Stdout};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::tty::IsTty;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::{Frame, Terminal};

use crate::core::credentials::CredentialStore;
use crate::core::login::{LoginField, LoginPrompt};
use crate::error::{GistlyError, Result};
use crate::tui::event::{DialogEvent, EventPump};
use crate::tui::theme::Theme;

/// How the dialog ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials were validated and stored
    Submitted,
    /// User backed out without saving
    Cancelled,
}

// Form fields by index
const FIELD_USERNAME: usize = 0;
const FIELD_PASSWORD: usize = 1;
const FIELD_LOGIN: usize = 2;
const FIELD_CANCEL: usize = 3;
const FIELD_COUNT: usize = 4;

/// Whether a dialog can be shown at all
///
/// Rendering needs a terminal on stdout; keyboard input still works with
/// piped stdin because crossterm reads from the controlling tty.
pub fn is_interactive() -> bool {
    io::stdout().is_tty()
}

/// Modal login dialog over the whole terminal
pub struct LoginDialog {
    prompt: LoginPrompt,
    field: usize,
}

impl LoginDialog {
    /// Create a dialog, prefilling the username when one is known
    pub fn new(prefill: Option<&str>) -> Self {
        let prompt = LoginPrompt::open(prefill);
        let field = match prompt.focus() {
            LoginField::Username => FIELD_USERNAME,
            LoginField::Password => FIELD_PASSWORD,
        };

        Self { prompt, field }
    }

    /// Run the dialog until it settles on an outcome
    pub async fn run(mut self, store: &mut CredentialStore) -> Result<LoginOutcome> {
        let mut terminal = setup_terminal()?;
        let mut events = EventPump::new();

        let outcome = loop {
            terminal
                .draw(|frame| self.render(frame))
                .map_err(|e| GistlyError::Terminal(e.to_string()))?;

            match events.next().await {
                Some(DialogEvent::Key(key)) => {
                    if let Some(outcome) = self.handle_key(key, store) {
                        break outcome;
                    }
                }
                Some(DialogEvent::Resize) => {
                    // Redrawn on the next loop iteration
                }
                None => break LoginOutcome::Cancelled,
            }
        };

        restore_terminal(&mut terminal)?;
        Ok(outcome)
    }

    /// Apply one key press; `Some` means the dialog is done
    fn handle_key(&mut self, key: KeyEvent, store: &mut CredentialStore) -> Option<LoginOutcome> {
        match key.code {
            KeyCode::Esc => {
                self.prompt.cancel();
                return Some(LoginOutcome::Cancelled);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.prompt.cancel();
                return Some(LoginOutcome::Cancelled);
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus_field((self.field + 1) % FIELD_COUNT);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_field(if self.field == 0 {
                    FIELD_COUNT - 1
                } else {
                    self.field - 1
                });
            }
            KeyCode::Left | KeyCode::Right if self.field >= FIELD_LOGIN => {
                // Toggle between the two buttons
                self.focus_field(if self.field == FIELD_LOGIN {
                    FIELD_CANCEL
                } else {
                    FIELD_LOGIN
                });
            }
            KeyCode::Enter => match self.field {
                FIELD_USERNAME => self.focus_field(FIELD_PASSWORD),
                FIELD_CANCEL => {
                    self.prompt.cancel();
                    return Some(LoginOutcome::Cancelled);
                }
                // Password field and Login button both submit
                _ => {
                    if self.prompt.submit(store) {
                        return Some(LoginOutcome::Submitted);
                    }
                }
            },
            KeyCode::Backspace if self.field <= FIELD_PASSWORD => {
                self.prompt.backspace();
            }
            KeyCode::Char(c)
                if self.field <= FIELD_PASSWORD
                    && !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.prompt.insert(c);
            }
            _ => {}
        }

        None
    }

    fn focus_field(&mut self, field: usize) {
        self.field = field;
        match field {
            FIELD_USERNAME => self.prompt.set_focus(LoginField::Username),
            FIELD_PASSWORD => self.prompt.set_focus(LoginField::Password),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Calculate centered popup area
        let popup_width = 46.min(area.width);
        let popup_height = 13.min(area.height);
        let popup_x = (area.width.saturating_sub(popup_width)) / 2;
        let popup_y = (area.height.saturating_sub(popup_height)) / 2;
        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let outer_block = Block::default()
            .title(" Login to GitHub ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::PRIMARY));
        frame.render_widget(outer_block, popup_area);

        let inner_area = popup_area.inner(Margin::new(1, 1));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Username
                Constraint::Length(3), // Password
                Constraint::Length(1), // Message
                Constraint::Length(3), // Buttons
                Constraint::Length(1), // Help
            ])
            .split(inner_area);

        // Username field (field 0)
        let username_style = if self.field == FIELD_USERNAME {
            Theme::focused()
        } else {
            Theme::normal()
        };
        let username_text = if self.prompt.username().is_empty() && self.field != FIELD_USERNAME {
            Span::styled("GitHub username...", Theme::muted())
        } else {
            Span::raw(self.prompt.username())
        };
        let username_block = Block::default()
            .title(" Username ")
            .borders(Borders::ALL)
            .border_style(username_style);
        frame.render_widget(Paragraph::new(username_text).block(username_block), chunks[0]);

        // Password field (field 1), always rendered masked
        let password_style = if self.field == FIELD_PASSWORD {
            Theme::focused()
        } else {
            Theme::normal()
        };
        let masked = "•".repeat(self.prompt.password_len());
        let password_text = if masked.is_empty() && self.field != FIELD_PASSWORD {
            Span::styled("Password or token...", Theme::muted())
        } else {
            Span::raw(masked)
        };
        let password_block = Block::default()
            .title(" Password ")
            .borders(Borders::ALL)
            .border_style(password_style);
        frame.render_widget(Paragraph::new(password_text).block(password_block), chunks[1]);

        // Why the last submit was rejected
        if let Some(message) = self.prompt.message() {
            let message_paragraph = Paragraph::new(message).style(Theme::error());
            frame.render_widget(message_paragraph, chunks[2]);
        }

        // Buttons (fields 2 and 3)
        let button_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[3]);

        let login_style = if self.field == FIELD_LOGIN {
            Theme::submit()
        } else {
            Theme::normal()
        };
        let login_block = Block::default().borders(Borders::ALL).border_style(login_style);
        let login_button = Paragraph::new("[ Login ]")
            .block(login_block)
            .alignment(Alignment::Center);
        frame.render_widget(login_button, button_chunks[0]);

        let cancel_style = if self.field == FIELD_CANCEL {
            Theme::focused()
        } else {
            Theme::normal()
        };
        let cancel_block = Block::default()
            .borders(Borders::ALL)
            .border_style(cancel_style);
        let cancel_button = Paragraph::new("[ Cancel ]")
            .block(cancel_block)
            .alignment(Alignment::Center);
        frame.render_widget(cancel_button, button_chunks[1]);

        // Help bar
        let help = Paragraph::new(" [Tab] Next field  [Enter] Submit  [Esc] Cancel")
            .style(Theme::muted());
        frame.render_widget(help, chunks[4]);
    }
}

/// Setup terminal for the dialog
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().map_err(|e| GistlyError::Terminal(e.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| GistlyError::Terminal(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).map_err(|e| GistlyError::Terminal(e.to_string()))?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().map_err(|e| GistlyError::Terminal(e.to_string()))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| GistlyError::Terminal(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| GistlyError::Terminal(e.to_string()))?;
    Ok(())
}
