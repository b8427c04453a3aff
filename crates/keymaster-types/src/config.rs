//! Runtime configuration types.

use std::path::PathBuf;

use serde::Deserialize;

use crate::key::Redacted;

/// Bot configuration assembled from environment variables.
///
/// Secret-bearing fields are wrapped in [`Redacted`] so the whole struct
/// can be logged at debug level without leaking credentials.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot token (from `BOT_TOKEN`).
    pub bot_token: Redacted,
    /// Base64-encoded 32-byte vault master key (from `FERNET_KEY`).
    pub master_key: Redacted,
    /// The only Telegram user ID allowed to use the bot (from `OWNER_ID`).
    pub owner_id: i64,
    /// Public HTTPS URL Telegram delivers updates to (from `WEBHOOK_URL`).
    pub webhook_url: String,
    /// Optional secret token Telegram echoes back on every webhook request
    /// (from `WEBHOOK_SECRET`). When set, requests without it are rejected.
    pub webhook_secret: Option<Redacted>,
    /// Directory holding the SQLite database (from `KEYMASTER_DATA_DIR`,
    /// defaulting to `~/.keymaster`).
    pub data_dir: PathBuf,
}

/// HTTP server settings, loadable from `{data_dir}/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind the webhook server to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}
