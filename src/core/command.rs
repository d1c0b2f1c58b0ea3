//! Async command pattern for side effects.
//!
//! Commands represent async operations that run outside the main event loop.
//! Screens return commands from their update funnel, and the App spawns them
//! with automatic completion notification.

use async_trait::async_trait;

/// Async command that performs side effects.
///
/// Commands are spawned by the App. They typically send results back to the
/// originating screen via its message channel; they never mutate screen
/// state directly.
#[async_trait]
pub trait Command: Send + 'static {
    /// Human-readable name for logging and error display.
    fn name(&self) -> String;

    /// Execute the command.
    ///
    /// # Errors
    /// Returns an error only for infrastructure failures. Expected failures
    /// (a fetch that comes back empty-handed) are reported through the
    /// screen's message channel instead.
    async fn execute(self: Box<Self>) -> color_eyre::Result<()>;
}
