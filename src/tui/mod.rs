// ABOUTME: TUI module — ratatui full-screen chat surface for botchat.
// ABOUTME: Chat pane, input line with history recall, status bar, and the clear-chat modal.

pub mod input;
pub mod runner;
pub mod state;
pub mod ui;
pub mod widgets;

pub use runner::run_chat;
pub use state::*;
