//! Application-level messages.
//!
//! These drive route transitions and global state. Screen-specific messages
//! are handled locally within each screen using its own channel (e.g.
//! `HomeMsg`).

use crate::points::PointsParams;

/// Application-level messages for state transitions and global state.
#[derive(Debug, Clone)]
pub enum AppMessage {
    // === Lifecycle ===
    /// Periodic tick for animations
    Tick,
    /// Render the UI
    Render,
    /// Terminal resized
    Resize(u16, u16),
    /// Suspend the application (Ctrl+Z)
    Suspend,
    /// Resume from suspension
    Resume,
    /// Quit the application
    Quit,
    /// Clear and redraw the terminal
    ClearScreen,

    // === Feedback ===
    /// Display an error in the status bar
    DisplayError(String),

    // === Screens ===
    /// A spawned command finished, the active screen should drain its queue
    CommandCompleted,
    /// A complete selection was confirmed, open the points screen
    OpenPoints(PointsParams),
    /// Leave the current screen (points -> home, home -> quit)
    GoBack,
}
