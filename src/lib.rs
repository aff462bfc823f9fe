// ABOUTME: Library root for botchat — re-exports all modules for integration testing.
// ABOUTME: The binary entry point is in main.rs, which uses this crate as a library.

pub mod app;
pub mod config;
pub mod identity;
pub mod logging;
pub mod recall;
pub mod reply;
pub mod session;
pub mod tui;
