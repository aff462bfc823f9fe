// ABOUTME: App orchestrator — wires storage, reply service, identity, and session, then runs a command.
// ABOUTME: Owns terminal setup/teardown for the interactive chat surface.

use std::io;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::EventStream;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::config::Config;
use crate::identity::{IdentityProvider, LocalIdentity, UserIdentity};
use crate::reply::{HttpReplyService, ReplyService};
use crate::session::export::render_transcript;
use crate::session::{
    ChatSession, ClearConfirmation, DirectoryExportSink, ExportOutcome, FileStore,
    KeyValueStore, MemoryStore, SessionParams,
};
use crate::tui::{TuiState, run_chat};

/// Top-level application that builds the session and its collaborators.
pub struct App {
    config: Config,
    ephemeral: bool,
}

impl App {
    /// Create a new app. `ephemeral` keeps history in memory only.
    pub fn new(config: Config, ephemeral: bool) -> Self {
        Self { config, ephemeral }
    }

    /// Resolve the current user, failing with the login-surface message.
    pub fn identity(&self) -> anyhow::Result<UserIdentity> {
        let provider = LocalIdentity::new(self.config.identity.email.clone());
        provider
            .current_user()
            .map_err(|e| anyhow::anyhow!("{e} (set [identity] email, --user, or BOTCHAT_USER)"))
    }

    fn store(&self) -> Arc<dyn KeyValueStore> {
        if self.ephemeral {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(FileStore::new(self.config.store_dir()))
        }
    }

    fn replier(&self) -> anyhow::Result<Arc<dyn ReplyService>> {
        let service = HttpReplyService::new(
            self.config.reply.endpoint.clone(),
            self.config.reply.timeout(),
        )?;
        Ok(Arc::new(service))
    }

    /// Start a session for `user` against the configured collaborators.
    pub fn session(&self, user: &UserIdentity) -> anyhow::Result<ChatSession> {
        Ok(ChatSession::start(SessionParams {
            store: self.store(),
            replier: self.replier()?,
            user: user.greeting_name().to_string(),
            timing: self.config.reply.timing(),
            stale_replies: self.config.reply.stale_replies,
        }))
    }

    fn export_sink(&self) -> DirectoryExportSink {
        DirectoryExportSink::new(self.config.export_dir())
    }

    /// Run the interactive chat surface until the user quits.
    pub async fn run_chat(&self) -> anyhow::Result<()> {
        let user = self.identity()?;
        let mut session = self.session(&user)?;
        let mut state = TuiState::new(user);
        let sink = self.export_sink();
        let started = Instant::now();

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = run_chat(
            &mut terminal,
            &mut session,
            &mut state,
            &sink,
            EventStream::new(),
        )
        .await;

        // Restore the terminal even when the loop failed.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        if result.is_ok() {
            print_exit_screen(started, session.messages().len());
        }
        result
    }

    /// Send one message without the TUI and return the bot's reply text.
    pub async fn send_once(&self, text: &str) -> anyhow::Result<String> {
        let user = self.identity()?;
        let mut session = self.session(&user)?;
        let reply = session
            .send(text)
            .await
            .ok_or_else(|| anyhow::anyhow!("nothing to send"))?;
        Ok(reply.text)
    }

    /// Stored transcript, one `[timestamp] SENDER: text` line per message.
    pub fn history(&self) -> anyhow::Result<String> {
        let user = self.identity()?;
        let session = self.session(&user)?;
        Ok(render_transcript(session.messages()))
    }

    /// Export the stored transcript through the configured sink.
    pub fn export(&self) -> anyhow::Result<ExportOutcome> {
        let user = self.identity()?;
        let session = self.session(&user)?;
        session.export(&self.export_sink())
    }

    /// Clear stored history if the user confirmed. Returns whether it was cleared.
    pub fn clear(&self, confirmed: bool) -> anyhow::Result<bool> {
        let Some(confirmation) = ClearConfirmation::from_answer(confirmed) else {
            info!("clear declined; history kept");
            return Ok(false);
        };
        let user = self.identity()?;
        let mut session = self.session(&user)?;
        session.clear(confirmation);
        Ok(true)
    }
}

/// Print a farewell line after the TUI exits.
fn print_exit_screen(started: Instant, message_count: usize) {
    let elapsed_secs = started.elapsed().as_secs();
    let elapsed = if elapsed_secs >= 3600 {
        format!("{}h {:02}m", elapsed_secs / 3600, (elapsed_secs % 3600) / 60)
    } else {
        format!("{}m {:02}s", elapsed_secs / 60, elapsed_secs % 60)
    };
    println!();
    println!("  Session lasted {elapsed}; {message_count} messages in history.");
    println!();
}
