// ABOUTME: Status bar widget — message count, busy state, key hints, or the latest notice.
// ABOUTME: Displayed at the bottom of the TUI as a single-line summary.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const KEY_HINTS: &str = "Enter send · ↑/↓ history · Ctrl+L clear · Ctrl+E export · Esc quit";

/// Render the status bar. A notice replaces the key hints.
pub fn status_line(message_count: usize, busy: bool, notice: Option<&str>) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled(
            format!(" {} ", format_count(message_count)),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled("| ", dim),
    ];

    if busy {
        spans.push(Span::styled("typing... ", Style::default().fg(Color::Yellow)));
        spans.push(Span::styled("| ", dim));
    }

    match notice {
        Some(notice) => spans.push(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        )),
        None => spans.push(Span::styled(KEY_HINTS, dim)),
    }

    Line::from(spans)
}

/// "1 message", "3 messages".
pub fn format_count(count: usize) -> String {
    if count == 1 {
        "1 message".to_string()
    } else {
        format!("{count} messages")
    }
}
