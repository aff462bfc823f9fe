// ABOUTME: TUI widget sub-modules for the chat pane, status bar, and clear-chat modal.
// ABOUTME: Each widget is a pure rendering function returning styled Lines.

pub mod chat;
pub mod confirm;
pub mod status;
