// ABOUTME: TUI state — input line, recall buffer, scroll position, clear modal, and status notice.
// ABOUTME: The message log itself lives in the ChatSession; this is presentation state only.

use crate::identity::UserIdentity;
use crate::recall::RecallBuffer;

/// Read-only view of the session handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct ChatView<'a> {
    pub messages: &'a [crate::session::ChatMessage],
    pub busy: bool,
}

/// Full TUI application state.
pub struct TuiState {
    pub user: UserIdentity,
    pub input: String,
    pub cursor_pos: usize,
    /// Lines scrolled up from the bottom (0 = pinned to newest content).
    pub scroll_offset: u16,
    pub recall: RecallBuffer,
    /// Whether the clear-chat confirmation modal is open.
    pub confirm_clear: bool,
    /// One-line notice shown in the status bar until the next key press.
    pub notice: Option<String>,
}

impl TuiState {
    pub fn new(user: UserIdentity) -> Self {
        Self {
            user,
            input: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            recall: RecallBuffer::new(),
            confirm_clear: false,
            notice: None,
        }
    }

    /// Jump back to the newest content.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// Submit the current input buffer. Returns the trimmed text if non-empty
    /// and records it for later recall.
    pub fn submit_input(&mut self) -> Option<String> {
        let trimmed = self.input.trim().to_string();
        if trimmed.is_empty() {
            return None;
        }
        self.recall.record(&trimmed);
        self.input.clear();
        self.cursor_pos = 0;
        Some(trimmed)
    }

    /// Replace the input with a recalled entry, cursor at the end.
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.cursor_pos = self.input_char_len();
    }

    /// Recall the previous history entry into the input line.
    pub fn recall_previous(&mut self) {
        if let Some(text) = self.recall.recall_previous().map(str::to_string) {
            self.set_input(&text);
        }
    }

    /// Recall the next history entry into the input line.
    pub fn recall_next(&mut self) {
        if let Some(text) = self.recall.recall_next().map(str::to_string) {
            self.set_input(&text);
        }
    }

    /// Clamp the cursor position to the valid character range of the input buffer.
    pub fn clamp_cursor(&mut self) {
        self.cursor_pos = self.cursor_pos.min(self.input_char_len());
    }

    /// Return the current cursor byte index in the UTF-8 input buffer.
    pub fn cursor_byte_index(&self) -> usize {
        char_index_to_byte_index(&self.input, self.cursor_pos)
    }

    pub fn input_char_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at the cursor and advance by one character.
    pub fn insert_char_at_cursor(&mut self, c: char) {
        self.clamp_cursor();
        let byte_index = self.cursor_byte_index();
        self.input.insert(byte_index, c);
        self.cursor_pos += 1;
        self.recall.reset();
    }

    /// Delete the character before the cursor (backspace behavior).
    pub fn backspace_char(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos == 0 {
            return;
        }

        let end = self.cursor_byte_index();
        let start = char_index_to_byte_index(&self.input, self.cursor_pos - 1);
        self.input.replace_range(start..end, "");
        self.cursor_pos -= 1;
        self.recall.reset();
    }

    /// Delete the character at the cursor (delete behavior).
    pub fn delete_char_at_cursor(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos >= self.input_char_len() {
            return;
        }

        let start = self.cursor_byte_index();
        let end = char_index_to_byte_index(&self.input, self.cursor_pos + 1);
        self.input.replace_range(start..end, "");
        self.recall.reset();
    }

    pub fn move_cursor_left(&mut self) {
        self.clamp_cursor();
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos < self.input_char_len() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_pos = self.input_char_len();
    }
}

fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    if char_index == 0 {
        return 0;
    }

    match s.char_indices().nth(char_index) {
        Some((idx, _)) => idx,
        None => s.len(),
    }
}
