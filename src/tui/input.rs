// ABOUTME: Keyboard input handling for the TUI — translates key events into actions.
// ABOUTME: Handles typing, history recall, the clear-chat confirmation modal, and disabled input while busy.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::state::TuiState;

/// The result of processing a key event.
#[derive(Debug, PartialEq)]
pub enum InputResult {
    /// No action needed.
    None,
    /// User submitted a message.
    Send(String),
    /// User answered yes in the clear-chat modal.
    ClearConfirmed,
    /// User asked to export the transcript.
    Export,
    /// User wants to quit.
    Quit,
}

/// Process a key event against the current TUI state and return the resulting action.
///
/// `busy` is true while a reply is outstanding; the input line is disabled then.
pub fn handle_key(state: &mut TuiState, busy: bool, key: KeyEvent) -> InputResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Ctrl+C always quits
    if ctrl && key.code == KeyCode::Char('c') {
        return InputResult::Quit;
    }

    state.notice = None;

    // PageUp/PageDown always scroll, regardless of mode.
    if handle_scroll_key(state, key.code) {
        return InputResult::None;
    }

    if state.confirm_clear {
        return handle_confirm_key(state, key);
    }

    match key.code {
        KeyCode::Char('l') if ctrl => {
            state.confirm_clear = true;
            return InputResult::None;
        }
        KeyCode::Char('e') if ctrl => return InputResult::Export,
        KeyCode::Esc => return InputResult::Quit,
        _ => {}
    }

    // Input is disabled while the bot is typing.
    if busy {
        return InputResult::None;
    }

    match key.code {
        KeyCode::Enter => {
            if let Some(text) = state.submit_input() {
                InputResult::Send(text)
            } else {
                InputResult::None
            }
        }
        KeyCode::Up => {
            state.recall_previous();
            InputResult::None
        }
        KeyCode::Down => {
            state.recall_next();
            InputResult::None
        }
        KeyCode::Char(c) if !ctrl => {
            state.insert_char_at_cursor(c);
            InputResult::None
        }
        KeyCode::Backspace => {
            state.backspace_char();
            InputResult::None
        }
        KeyCode::Delete => {
            state.delete_char_at_cursor();
            InputResult::None
        }
        KeyCode::Left => {
            state.move_cursor_left();
            InputResult::None
        }
        KeyCode::Right => {
            state.move_cursor_right();
            InputResult::None
        }
        KeyCode::Home => {
            state.move_cursor_home();
            InputResult::None
        }
        KeyCode::End => {
            state.move_cursor_end();
            InputResult::None
        }
        _ => InputResult::None,
    }
}

fn handle_scroll_key(state: &mut TuiState, key: KeyCode) -> bool {
    match key {
        KeyCode::PageUp => {
            state.scroll_offset = state.scroll_offset.saturating_add(10);
            true
        }
        KeyCode::PageDown => {
            state.scroll_offset = state.scroll_offset.saturating_sub(10);
            true
        }
        _ => false,
    }
}

/// Handle key events while the clear-chat modal is open.
fn handle_confirm_key(state: &mut TuiState, key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            state.confirm_clear = false;
            InputResult::ClearConfirmed
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.confirm_clear = false;
            InputResult::None
        }
        _ => InputResult::None,
    }
}
