//! Screen trait for the application's routes.
//!
//! Screens follow the Elm architecture with a single-funnel update pattern:
//! - `init()` queues initial message(s)
//! - `handle_key()` queues messages from user input
//! - `handle_tick()` handles animation ticks
//! - `update()` processes all queued messages - THE SINGLE FUNNEL
//!
//! Only `update()` can return commands, request navigation, or report
//! errors. This ensures all side effects flow through one place.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::core::command::Command;
use crate::points::PointsParams;

/// Result from `update()`.
pub enum UpdateResult {
    /// No action needed
    Idle,
    /// Spawn these commands
    Commands(Vec<Box<dyn Command>>),
    /// Open the points screen with a confirmed selection
    OpenPoints(PointsParams),
    /// Close this screen
    Close,
    /// Report an error
    Error(String),
}

impl<T: Command> From<T> for UpdateResult {
    fn from(value: T) -> Self {
        Self::Commands(vec![Box::new(value)])
    }
}

/// A keybinding hint shown in the status bar.
#[derive(Debug, Clone, Copy)]
pub struct Hint {
    pub key: &'static str,
    pub action: &'static str,
}

/// One screen of the application.
///
/// Screens manage their own internal state and message queue. The App calls
/// methods in this order:
///
/// 1. `init()` - once when the screen becomes active
/// 2. `update()` - immediately after init to process startup messages
/// 3. For each event:
///    - `handle_tick()` if tick event
///    - `handle_key()` if key event, then `update()` if consumed
/// 4. When a command completes: `update()`
pub trait Screen {
    /// Initialize the screen by queuing startup message(s).
    fn init(&mut self) {}

    /// Handle a tick event for animations (spinners, etc.).
    fn handle_tick(&mut self) {}

    /// Handle a key event. Returns `true` if the event was consumed
    /// (the App will then call `update()`).
    fn handle_key(&mut self, key: KeyEvent) -> bool;

    /// Process all queued messages and return the result.
    ///
    /// **THIS IS THE SINGLE FUNNEL.** This is the ONLY method that can
    /// return commands to spawn, request navigation, or report errors.
    fn update(&mut self) -> UpdateResult;

    /// Render the current state to the terminal.
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Breadcrumb segments for the status bar.
    fn breadcrumbs(&self) -> Vec<String>;

    /// Keybinding hints for the current state of this screen.
    fn hints(&self) -> Vec<Hint> {
        vec![]
    }
}
