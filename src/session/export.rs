// ABOUTME: Transcript export — renders the message log as text and hands it to a download sink.
// ABOUTME: Filenames embed an ISO-8601 timestamp: chat_export_<timestamp>.txt.

use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::session::message::ChatMessage;

/// Notice shown when there is nothing to export.
pub const EXPORT_EMPTY_NOTICE: &str = "No chat history to export.";

/// Receives an exported transcript and saves it somewhere the user can reach.
pub trait ExportSink {
    /// Save `contents` under `filename`, returning a description of where it went.
    fn save(&self, filename: &str, contents: &str) -> anyhow::Result<String>;
}

/// Result of an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The log was empty; nothing was handed to the sink.
    Empty,
    Saved { filename: String, location: String },
}

impl ExportOutcome {
    /// One-line, user-facing description of the outcome.
    pub fn notice(&self) -> String {
        match self {
            ExportOutcome::Empty => EXPORT_EMPTY_NOTICE.to_string(),
            ExportOutcome::Saved { location, .. } => format!("Chat exported to {location}"),
        }
    }
}

/// Render messages as `[timestamp] SENDER: text` lines in log order.
pub fn render_transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("[{}] {}: {}", m.timestamp, m.sender.label(), m.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Export filename for the given instant, e.g. `chat_export_2026-01-15T10:00:00.000Z.txt`.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!(
        "chat_export_{}.txt",
        now.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Writes exports as files into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryExportSink {
    dir: PathBuf,
}

impl DirectoryExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ExportSink for DirectoryExportSink {
    fn save(&self, filename: &str, contents: &str) -> anyhow::Result<String> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        std::fs::write(&path, contents)?;
        Ok(path.to_string_lossy().to_string())
    }
}
