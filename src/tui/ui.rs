// ABOUTME: Main TUI rendering function — assembles header, chat, modal, input, and status bar.
// ABOUTME: Splits the terminal frame into vertical layout chunks and delegates to widgets.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::tui::state::{ChatView, TuiState};
use crate::tui::widgets::chat::{TYPING_INDICATOR, render_chat_lines};
use crate::tui::widgets::confirm::confirm_lines;
use crate::tui::widgets::status::status_line;

pub const INPUT_PLACEHOLDER: &str = "Type a message...";

/// Render the full TUI screen layout to the given frame.
pub fn render(frame: &mut Frame, state: &mut TuiState, view: ChatView<'_>) {
    let area = frame.area();
    let show_modal = state.confirm_clear;

    let constraints = if show_modal {
        vec![
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Chat area
            Constraint::Length(3), // Clear-chat modal
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Status bar
        ]
    } else {
        vec![
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Chat area
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Status bar
        ]
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    // Header: title and greeting on the left, avatar initial on the right.
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(5)])
        .split(chunks[0]);
    let header = Line::from(vec![
        Span::styled(
            " Chat Bot",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default()),
        Span::styled(
            format!("Hello, {}", state.user.greeting_name()),
            Style::default().fg(Color::Gray),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), header_chunks[0]);
    let avatar = Line::from(Span::styled(
        format!(" {} ", state.user.initial()),
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(avatar), header_chunks[1]);

    // Chat area
    let chat_chunk = chunks[1];
    let visible_height = chat_chunk.height;
    let mut lines = render_chat_lines(view.messages, view.busy);

    // Render only the tail that can reach the viewport; Paragraph::scroll is u16.
    let wanted = visible_height as usize + state.scroll_offset as usize;
    let (start, tail_height) = tail_start(&lines, chat_chunk.width, wanted);
    let chat_paragraph = Paragraph::new(lines.split_off(start)).wrap(Wrap { trim: false });

    let total_lines = u16::try_from(tail_height).unwrap_or(u16::MAX);
    let max_scroll = total_lines.saturating_sub(visible_height);

    if state.scroll_offset > max_scroll {
        state.scroll_offset = max_scroll;
    }

    // scroll_offset is lines scrolled up from the bottom (0 = at bottom)
    let scroll = max_scroll.saturating_sub(state.scroll_offset);
    frame.render_widget(chat_paragraph.scroll((scroll, 0)), chat_chunk);

    let (input_chunk, status_chunk) = if show_modal {
        frame.render_widget(Paragraph::new(confirm_lines()), chunks[2]);
        (chunks[3], chunks[4])
    } else {
        (chunks[2], chunks[3])
    };

    // Input area
    let mut input_block = Block::default().borders(Borders::TOP | Borders::BOTTOM);
    if view.busy {
        input_block = input_block.title(Span::styled(
            format!(" {} ", TYPING_INDICATOR),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let input = if state.input.is_empty() {
        let placeholder = if view.busy {
            TYPING_INDICATOR
        } else {
            INPUT_PLACEHOLDER
        };
        Span::styled(placeholder, Style::default().fg(Color::DarkGray))
    } else if view.busy {
        Span::styled(state.input.clone(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(state.input.clone())
    };
    frame.render_widget(Paragraph::new(input).block(input_block), input_chunk);

    // Show the cursor only while the input line is editable.
    if !view.busy && !show_modal && input_chunk.width > 0 && input_chunk.height > 1 {
        state.clamp_cursor();
        let prefix: String = state.input.chars().take(state.cursor_pos).collect();
        let visual_col = UnicodeWidthStr::width(prefix.as_str());
        let max_visual_col = input_chunk.width.saturating_sub(1) as usize;
        let cursor_x = input_chunk
            .x
            .saturating_add(visual_col.min(max_visual_col) as u16);
        // +1 for the top border.
        let cursor_y = input_chunk.y.saturating_add(1);
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }

    // Status bar
    let status = status_line(view.messages.len(), view.busy, state.notice.as_deref());
    frame.render_widget(Paragraph::new(status), status_chunk);
}

/// Index of the first line needed to fill `wanted` wrapped rows counted from
/// the bottom, and the wrapped height of `lines[index..]`.
fn tail_start(lines: &[Line<'_>], width: u16, wanted: usize) -> (usize, usize) {
    let mut start = lines.len();
    let mut height = 0usize;
    while start > 0 && height < wanted {
        start -= 1;
        // Use ratatui's own line_count() so the height matches its wrapped rendering.
        height += Paragraph::new(lines[start].clone())
            .wrap(Wrap { trim: false })
            .line_count(width);
    }
    (start, height)
}
