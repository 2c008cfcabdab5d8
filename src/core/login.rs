//! Login prompt state machine
//!
//! Models the credential dialog independently of any terminal backend: the
//! TUI layer feeds edits in and renders what this state machine exposes.
//! A prompt starts open and settles on exactly one outcome, submitted or
//! cancelled. Failed validation or a failed save keeps it open with a
//! message instead of closing it.

use crate::core::credentials::CredentialStore;

/// Shown when username or password is missing on submit
pub const VALIDATION_MESSAGE: &str = "Please fill in your username and password.";

/// Editable fields of the login prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

/// Lifecycle of a login prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    /// Dialog is visible and editable
    Open,
    /// Credentials were validated and stored
    Submitted,
    /// User dismissed the dialog without saving
    Cancelled,
}

/// State of one credential dialog
pub struct LoginPrompt {
    username: String,
    password: String,
    focus: LoginField,
    message: Option<String>,
    state: LoginState,
}

impl LoginPrompt {
    /// Open the prompt, prefilling the username when one is known
    ///
    /// With a prefilled username the password field takes focus, otherwise
    /// the username field does.
    pub fn open(prefill: Option<&str>) -> Self {
        let username = prefill.unwrap_or_default().to_string();
        let focus = if username.is_empty() {
            LoginField::Username
        } else {
            LoginField::Password
        };

        Self {
            username,
            password: String::new(),
            focus,
            message: None,
            state: LoginState::Open,
        }
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    pub fn focus(&self) -> LoginField {
        self.focus
    }

    pub fn set_focus(&mut self, field: LoginField) {
        self.focus = field;
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Length of the password buffer; the text itself stays private
    pub fn password_len(&self) -> usize {
        self.password.chars().count()
    }

    /// Message explaining why the last submit was rejected
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Append a character to the focused field
    pub fn insert(&mut self, c: char) {
        match self.focus {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    /// Remove the last character of the focused field
    pub fn backspace(&mut self) {
        match self.focus {
            LoginField::Username => {
                self.username.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }

    /// Validate the fields and store the credentials
    ///
    /// Returns `true` once the credentials were saved and the prompt closed.
    /// On missing fields or a failed save the prompt stays open with a
    /// message and `false` comes back, letting the user correct and retry.
    pub fn submit(&mut self, store: &mut CredentialStore) -> bool {
        if self.state != LoginState::Open {
            return self.state == LoginState::Submitted;
        }

        if self.username.is_empty() || self.password.is_empty() {
            self.message = Some(VALIDATION_MESSAGE.to_string());
            return false;
        }

        match store.save(&self.username, &self.password) {
            Ok(()) => {
                self.message = None;
                self.state = LoginState::Submitted;
                true
            }
            Err(e) => {
                let reason = e.to_string();
                let reason = reason.lines().next().unwrap_or("unknown error").to_string();
                self.message = Some(format!("Could not save your credentials: {}", reason));
                false
            }
        }
    }

    /// Dismiss the dialog without saving anything
    pub fn cancel(&mut self) {
        if self.state == LoginState::Open {
            self.state = LoginState::Cancelled;
        }
    }
}
