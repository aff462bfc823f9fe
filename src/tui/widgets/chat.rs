// ABOUTME: Chat widget — renders the message log into styled ratatui Lines.
// ABOUTME: User and bot messages get distinct prefixes; timestamps trail each message.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::session::{ChatMessage, Sender};

/// Placeholder shown when there is no history and no reply pending.
pub const EMPTY_PLACEHOLDER: &str = "Start Chat...";

/// Shown below the log while a reply is outstanding.
pub const TYPING_INDICATOR: &str = "Bot is typing...";

/// Render the message log (and typing indicator) into styled Lines for display.
pub fn render_chat_lines(messages: &[ChatMessage], busy: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if messages.is_empty() && !busy {
        lines.push(Line::from(Span::styled(
            EMPTY_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    for (idx, msg) in messages.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(""));
        }

        let (prefix, color) = match msg.sender {
            Sender::User => ("❯ ", Color::Green),
            Sender::Bot => ("⏺ ", Color::Cyan),
        };

        // First line gets the prefix, continuation lines are indented.
        for (i, text) in msg.text.split('\n').enumerate() {
            if i == 0 {
                lines.push(Line::from(vec![
                    Span::styled(
                        prefix,
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(text.to_string()),
                ]));
            } else {
                lines.push(Line::from(Span::raw(format!("  {}", text))));
            }
        }
        lines.push(Line::from(Span::styled(
            format!("  {}", msg.timestamp),
            Style::default().fg(Color::DarkGray),
        )));
    }

    if busy {
        if !messages.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            TYPING_INDICATOR,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}
