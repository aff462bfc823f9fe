// ABOUTME: Chat message record — sender, text, and display timestamp.
// ABOUTME: The serialized form is the record shape stored under the session key.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Who produced a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Upper-cased label used in exported transcripts.
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "USER",
            Sender::Bot => "BOT",
        }
    }
}

/// A single entry in the conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub timestamp: String,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Create a message stamped with the current local time.
    pub fn now(sender: Sender, text: impl Into<String>) -> Self {
        Self::new(sender, text, display_time())
    }
}

/// Current local time formatted for display, e.g. `3:04:05 PM`.
pub fn display_time() -> String {
    Local::now().format("%-I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_serializes_lowercase() {
        let msg = ChatMessage::new(Sender::Bot, "hi", "1:00:00 PM");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(
            json,
            r#"{"sender":"bot","text":"hi","timestamp":"1:00:00 PM"}"#
        );
    }

    #[test]
    fn parses_stored_record_list() {
        let raw = r#"[
            {"sender":"user","text":"hello","timestamp":"9:15:02 AM"},
            {"sender":"bot","text":"Hello, a@b.c!","timestamp":"9:15:03 AM"}
        ]"#;
        let messages: Vec<ChatMessage> = serde_json::from_str(raw).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[1].text, "Hello, a@b.c!");
    }

    #[test]
    fn labels_are_upper_case() {
        assert_eq!(Sender::User.label(), "USER");
        assert_eq!(Sender::Bot.label(), "BOT");
    }

    #[test]
    fn display_time_has_meridiem() {
        let t = display_time();
        assert!(t.ends_with("AM") || t.ends_with("PM"), "got {t}");
        assert_eq!(t.matches(':').count(), 2);
    }
}
