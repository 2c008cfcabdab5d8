//! Terminal User Interface module
//!
//! This module contains the ratatui-based login dialog shown when a
//! publish needs credentials the keychain does not have.

pub mod event;
pub mod login;
pub mod theme;

pub use login::{LoginDialog, LoginOutcome};
