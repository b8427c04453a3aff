//! Application state wiring all services together.
//!
//! `BotService` is generic over the key/note store traits; `AppState` pins
//! it to the concrete encrypted SQLite implementations and pairs it with
//! the Telegram client the webhook handler replies through.

use std::sync::Arc;

use keymaster_core::service::bot::BotService;
use keymaster_infra::config::{self, load_bot_config};
use keymaster_infra::crypto::vault::VaultCrypto;
use keymaster_infra::sqlite::key::SqliteKeyRepository;
use keymaster_infra::sqlite::note::SqliteNoteRepository;
use keymaster_infra::sqlite::pool::DatabasePool;
use keymaster_infra::store::{VaultKeyStore, VaultNoteStore};
use keymaster_infra::telegram::client::TelegramClient;
use keymaster_types::config::BotConfig;

/// Concrete bot service pinned to the encrypted SQLite stores.
pub type ConcreteBotService = BotService<VaultKeyStore, VaultNoteStore>;

/// Shared application state for the webhook server.
#[derive(Clone)]
pub struct AppState {
    pub bot_service: Arc<ConcreteBotService>,
    pub telegram: Arc<TelegramClient>,
    pub config: Arc<BotConfig>,
}

impl AppState {
    /// Initialize the application state: load config, connect to the
    /// database, wire the encrypted stores and the Telegram client.
    pub async fn init() -> anyhow::Result<Self> {
        let config = load_bot_config()?;

        // Ensure data directory exists
        tokio::fs::create_dir_all(&config.data_dir).await?;

        let db_url = config::database_url(&config.data_dir);
        let db_pool = DatabasePool::new(&db_url).await?;

        let crypto = Arc::new(VaultCrypto::from_base64_key(config.master_key.expose())?);

        let key_store = VaultKeyStore::new(SqliteKeyRepository::new(db_pool.clone()), crypto.clone());
        let note_store = VaultNoteStore::new(SqliteNoteRepository::new(db_pool), crypto);

        let bot_service = BotService::new(key_store, note_store, config.owner_id);
        let telegram = TelegramClient::new(config.bot_token.clone())?;

        Ok(Self {
            bot_service: Arc::new(bot_service),
            telegram: Arc::new(telegram),
            config: Arc::new(config),
        })
    }
}
