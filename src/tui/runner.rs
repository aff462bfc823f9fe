// ABOUTME: TUI event loop — multiplexes terminal events with the in-flight bot reply.
// ABOUTME: Input never blocks on the reply; the session's busy flag is what disables submission.

use crossterm::event::{Event, KeyEventKind};
use futures::{Stream, StreamExt};
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::warn;

use crate::session::{ChatSession, ClearConfirmation, ExportSink, PendingReply, ResolvedReply};
use crate::tui::input::{InputResult, handle_key};
use crate::tui::state::{ChatView, TuiState};
use crate::tui::ui;

/// Drive the chat surface until the user quits or `events` ends.
///
/// When `events` ends with a reply still in flight, the reply is awaited and
/// appended before returning.
pub async fn run_chat<B, S>(
    terminal: &mut Terminal<B>,
    session: &mut ChatSession,
    state: &mut TuiState,
    sink: &dyn ExportSink,
    mut events: S,
) -> anyhow::Result<()>
where
    B: Backend,
    S: Stream<Item = std::io::Result<Event>> + Unpin,
{
    let mut pending: Option<PendingReply> = None;

    loop {
        draw(terminal, session, state)?;

        tokio::select! {
            reply = wait_for_reply(&mut pending) => {
                pending = None;
                session.complete(reply);
                state.scroll_to_bottom();
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match handle_key(state, session.is_busy(), key) {
                        InputResult::Send(text) => {
                            if let Some(reply) = session.submit(&text) {
                                pending = Some(reply);
                            }
                            state.scroll_to_bottom();
                        }
                        InputResult::ClearConfirmed => {
                            if let Some(confirmation) = ClearConfirmation::from_answer(true) {
                                session.clear(confirmation);
                            }
                            state.scroll_to_bottom();
                        }
                        InputResult::Export => {
                            let notice = match session.export(sink) {
                                Ok(outcome) => outcome.notice(),
                                Err(e) => {
                                    warn!(error = %e, "export failed");
                                    format!("Export failed: {e}")
                                }
                            };
                            state.notice = Some(notice);
                        }
                        InputResult::Quit => break,
                        InputResult::None => {}
                    }
                }
                // Resize, focus, and key-release events just trigger a redraw.
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => {
                    if let Some(reply) = pending.take() {
                        let reply = reply.await;
                        session.complete(reply);
                        state.scroll_to_bottom();
                        draw(terminal, session, state)?;
                    }
                    break;
                }
            }
        }
    }

    Ok(())
}

fn draw<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &ChatSession,
    state: &mut TuiState,
) -> anyhow::Result<()> {
    let view = ChatView {
        messages: session.messages(),
        busy: session.is_busy(),
    };
    terminal
        .draw(|frame| ui::render(frame, state, view))
        .map_err(|e| anyhow::anyhow!("failed to draw terminal: {e}"))?;
    Ok(())
}

async fn wait_for_reply(pending: &mut Option<PendingReply>) -> ResolvedReply {
    match pending {
        Some(reply) => reply.await,
        None => std::future::pending().await,
    }
}
