//! Configuration loading.
//!
//! Bot credentials come from environment variables. Server settings come
//! from `{data_dir}/config.toml`, falling back to defaults when the file is
//! missing or malformed; a `PORT` environment variable overrides the file.

use std::path::{Path, PathBuf};

use keymaster_types::config::{BotConfig, ServerConfig};
use keymaster_types::error::ConfigError;
use keymaster_types::key::Redacted;

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Resolve the data directory: `KEYMASTER_DATA_DIR` if set, otherwise
/// `~/.keymaster`.
pub fn resolve_data_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(dir) = std::env::var("KEYMASTER_DATA_DIR") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    dirs::home_dir()
        .map(|home| home.join(".keymaster"))
        .ok_or(ConfigError::InvalidVar {
            var: "KEYMASTER_DATA_DIR",
            reason: "not set and no home directory found".to_string(),
        })
}

/// Assemble [`BotConfig`] from the environment.
///
/// Required: `BOT_TOKEN`, `FERNET_KEY`, `OWNER_ID`, `WEBHOOK_URL`.
/// Optional: `WEBHOOK_SECRET`, `KEYMASTER_DATA_DIR`.
pub fn load_bot_config() -> Result<BotConfig, ConfigError> {
    let bot_token = Redacted::new(required_var("BOT_TOKEN")?);
    let master_key = Redacted::new(required_var("FERNET_KEY")?);

    let owner_id = required_var("OWNER_ID")?
        .trim()
        .parse::<i64>()
        .map_err(|e| ConfigError::InvalidVar {
            var: "OWNER_ID",
            reason: format!("must be a numeric Telegram user id: {e}"),
        })?;

    let webhook_url = required_var("WEBHOOK_URL")?;

    let webhook_secret = std::env::var("WEBHOOK_SECRET")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(Redacted::new);

    Ok(BotConfig {
        bot_token,
        master_key,
        owner_id,
        webhook_url,
        webhook_secret,
        data_dir: resolve_data_dir()?,
    })
}

/// Load server settings from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ServerConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - A `PORT` environment variable overrides the port from either source.
pub async fn load_server_config(data_dir: &Path) -> ServerConfig {
    let mut config = read_config_file(data_dir).await;
    apply_port_override(&mut config, std::env::var("PORT").ok().as_deref());
    config
}

async fn read_config_file(data_dir: &Path) -> ServerConfig {
    let config_path = data_dir.join("config.toml");

    match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => match toml::from_str::<ServerConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    "Failed to parse {}: {err}, using defaults",
                    config_path.display()
                );
                ServerConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            ServerConfig::default()
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            ServerConfig::default()
        }
    }
}

fn apply_port_override(config: &mut ServerConfig, port: Option<&str>) {
    if let Some(port) = port {
        match port.trim().parse::<u16>() {
            Ok(port) => config.port = port,
            Err(err) => tracing::warn!("Ignoring invalid PORT value: {err}"),
        }
    }
}

/// Database URL for the SQLite file inside `data_dir`.
pub fn database_url(data_dir: &Path) -> String {
    format!(
        "sqlite://{}?mode=rwc",
        data_dir.join("keymaster.db").display()
    )
}
