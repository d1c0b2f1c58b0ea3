//! Core framework for coleta.
//!
//! This module contains the foundational types that power the TUI:
//! - [`AppMessage`] - app-level messages for routing and global state
//! - [`Command`] - async side effect operations
//! - [`Screen`] - screens following an Elm-style single-funnel update
//!
//! # Terminology
//! - **Event**: input from the world (keyboard, timer) - see [`crate::tui::Event`]
//! - **Message**: internal communication driving state changes
//! - **Command**: async side effect operations - see [`Command`]

pub mod command;
pub mod message;
pub mod screen;

pub use command::Command;
pub use message::AppMessage;
pub use screen::{Hint, Screen, UpdateResult};
