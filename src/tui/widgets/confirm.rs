// ABOUTME: Clear-chat confirmation modal — the yes/no prompt guarding history deletion.
// ABOUTME: Rendered as a title line, a warning line, and the two key choices.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const CONFIRM_TITLE: &str = "Clear Chat?";
pub const CONFIRM_BODY: &str = "This will delete your entire chat history. Are you sure?";

/// Render the modal contents.
pub fn confirm_lines() -> Vec<Line<'static>> {
    let title = Line::from(Span::styled(
        CONFIRM_TITLE,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ));
    let body = Line::from(Span::styled(CONFIRM_BODY, Style::default().fg(Color::White)));
    let options = Line::from(vec![
        Span::styled(
            " [y] Confirm ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(" [n] Cancel ", Style::default().fg(Color::DarkGray)),
    ]);
    vec![title, body, options]
}
