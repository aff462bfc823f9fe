// ABOUTME: Input recall buffer — history of submitted entries with cursor-style recall.
// ABOUTME: Backs Up/Down navigation in the input line; pure state, no I/O.

/// Previously submitted entries, oldest first, plus an optional recall cursor.
///
/// `cursor == None` means the user is typing fresh text. When set, the cursor
/// always points at a valid entry.
#[derive(Debug, Default, Clone)]
pub struct RecallBuffer {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl RecallBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted entry and stop recalling. Blank text is ignored.
    pub fn record(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.entries.push(trimmed.to_string());
        self.cursor = None;
    }

    /// Step back towards the oldest entry, clamped at index 0.
    pub fn recall_previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let index = match self.cursor {
            None => self.entries.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    /// Step forward towards the newest entry, clamped at the last index.
    /// Does nothing unless a recall is already in progress.
    pub fn recall_next(&mut self) -> Option<&str> {
        let current = self.cursor?;
        let index = (current + 1).min(self.entries.len() - 1);
        self.cursor = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    /// Forget the recall position (the user edited the text directly).
    pub fn reset(&mut self) {
        self.cursor = None;
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
