// ABOUTME: Configuration loading for botchat.
// ABOUTME: Reads ~/.botchat/config.toml with per-section defaults, plus env overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::session::{ReplyTiming, StaleReplyPolicy};

/// Environment variable that overrides the configured user identity.
pub const USER_ENV: &str = "BOTCHAT_USER";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub identity: IdentityConfig,
    pub reply: ReplyConfig,
    pub storage: StorageConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Who is chatting.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub email: Option<String>,
}

/// Reply service endpoint and simulated typing delays.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReplyConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub greeting_delay_ms: u64,
    pub reply_delay_ms: u64,
    pub stale_replies: StaleReplyPolicy,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:3000/api/chat".to_string(),
            timeout_seconds: 30,
            greeting_delay_ms: 1000,
            reply_delay_ms: 2000,
            stale_replies: StaleReplyPolicy::Append,
        }
    }
}

impl ReplyConfig {
    pub fn timing(&self) -> ReplyTiming {
        ReplyTiming {
            greeting_delay: Duration::from_millis(self.greeting_delay_ms),
            reply_delay: Duration::from_millis(self.reply_delay_ms),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Where the chat log is stored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: Option<PathBuf>,
}

/// Where exports are written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub dir: Option<PathBuf>,
}

/// Log filter and destination.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load config from ~/.botchat/config.toml, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment overrides (currently only the user identity).
    pub fn apply_env(&mut self) {
        self.override_user(std::env::var(USER_ENV).ok());
    }

    /// Replace the configured user unless `user` is missing or blank.
    pub fn override_user(&mut self, user: Option<String>) {
        if let Some(user) = user
            && !user.trim().is_empty()
        {
            self.identity.email = Some(user);
        }
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".botchat")
            .join("config.toml")
    }

    /// Path to an optional secrets/env file loaded at startup.
    pub fn env_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".botchat")
            .join(".env")
    }

    /// Base directory for data files.
    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("botchat")
    }

    /// Directory holding the key-value store.
    pub fn store_dir(&self) -> PathBuf {
        self.storage
            .dir
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("store"))
    }

    /// Directory exports are written into.
    pub fn export_dir(&self) -> PathBuf {
        self.export.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Log file used while the TUI owns the terminal.
    pub fn log_file(&self) -> PathBuf {
        self.logging
            .file
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("botchat.log"))
    }
}
