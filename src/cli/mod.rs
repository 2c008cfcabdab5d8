//! CLI module for gistly
//!
//! This module contains all CLI command definitions and handlers using clap.

pub mod commands;
pub mod auth;
pub mod config;
pub mod create;

pub use commands::{Cli, Commands};
