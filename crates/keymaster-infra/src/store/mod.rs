//! Encrypted key and note stores.
//!
//! These wrap the SQLite repositories with vault encryption: plaintext goes
//! in, ciphertext hits the database, plaintext comes back out. The service
//! layer in `keymaster-core` only ever sees the `KeyProvider`/`NoteProvider`
//! traits.

use std::sync::Arc;

use tracing::warn;

use keymaster_core::repository::key::KeyProvider;
use keymaster_core::repository::note::NoteProvider;
use keymaster_types::error::{RepositoryError, StoreError};
use keymaster_types::key::KeyEntry;
use keymaster_types::note::{Note, NoteId};

use crate::crypto::vault::VaultCrypto;
use crate::sqlite::key::SqliteKeyRepository;
use crate::sqlite::note::SqliteNoteRepository;

/// Encrypted API key store backed by SQLite.
pub struct VaultKeyStore {
    repo: SqliteKeyRepository,
    crypto: Arc<VaultCrypto>,
}

impl VaultKeyStore {
    pub fn new(repo: SqliteKeyRepository, crypto: Arc<VaultCrypto>) -> Self {
        Self { repo, crypto }
    }
}

impl KeyProvider for VaultKeyStore {
    async fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        let Some(ciphertext) = self.repo.get(name).await? else {
            return Ok(None);
        };

        let plaintext = self
            .crypto
            .decrypt(&ciphertext)
            .map_err(|_| StoreError::Decryption)?;
        let value = String::from_utf8(plaintext)
            .map_err(|_| StoreError::Corrupt("key value is not valid utf-8".to_string()))?;
        Ok(Some(value))
    }

    async fn set(&self, name: &str, value: &str) -> Result<(), StoreError> {
        let ciphertext = self
            .crypto
            .encrypt(value.as_bytes())
            .map_err(|_| StoreError::Encryption)?;
        self.repo.upsert(name, &ciphertext).await?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        match self.repo.delete(name).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(StoreError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<KeyEntry>, StoreError> {
        Ok(self.repo.list().await?)
    }
}

/// Encrypted note store backed by SQLite.
pub struct VaultNoteStore {
    repo: SqliteNoteRepository,
    crypto: Arc<VaultCrypto>,
}

impl VaultNoteStore {
    pub fn new(repo: SqliteNoteRepository, crypto: Arc<VaultCrypto>) -> Self {
        Self { repo, crypto }
    }
}

impl NoteProvider for VaultNoteStore {
    async fn add(&self, text: &str) -> Result<NoteId, StoreError> {
        let ciphertext = self
            .crypto
            .encrypt(text.as_bytes())
            .map_err(|_| StoreError::Encryption)?;
        let id = self.repo.insert(&ciphertext).await?;
        Ok(NoteId::new(id))
    }

    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        let rows = self.repo.list().await?;

        let mut notes = Vec::with_capacity(rows.len());
        for (id, ciphertext) in rows {
            // A single undecryptable note must not hide the rest; surface it
            // with no text so the owner can still delete it.
            let text = match self.crypto.decrypt(&ciphertext) {
                Ok(plaintext) => match String::from_utf8(plaintext) {
                    Ok(text) => Some(text),
                    Err(_) => {
                        warn!(note_id = id, "note plaintext is not valid utf-8");
                        None
                    }
                },
                Err(_) => {
                    warn!(note_id = id, "note ciphertext failed authentication");
                    None
                }
            };
            notes.push(Note {
                id: NoteId::new(id),
                text,
            });
        }

        Ok(notes)
    }

    async fn delete(&self, id: NoteId) -> Result<(), StoreError> {
        match self.repo.delete(id.0).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(StoreError::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;
    use sqlx::Row;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn test_crypto() -> Arc<VaultCrypto> {
        let mut key = [0u8; 32];
        for (i, byte) in key.iter_mut().enumerate() {
            *byte = i as u8;
        }
        Arc::new(VaultCrypto::new(&key))
    }

    #[tokio::test]
    async fn test_key_store_roundtrip() {
        let pool = test_pool().await;
        let store = VaultKeyStore::new(SqliteKeyRepository::new(pool), test_crypto());

        store.set("OPENAI_KEY", "sk-abc123").await.unwrap();

        let value = store.get("OPENAI_KEY").await.unwrap().unwrap();
        assert_eq!(value, "sk-abc123");
    }

    #[tokio::test]
    async fn test_key_store_plaintext_never_persisted() {
        let pool = test_pool().await;
        let store = VaultKeyStore::new(SqliteKeyRepository::new(pool.clone()), test_crypto());

        store.set("SECRET", "very-sensitive-value").await.unwrap();

        let row = sqlx::query("SELECT ciphertext FROM api_keys WHERE name = 'SECRET'")
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        let stored: Vec<u8> = row.try_get("ciphertext").unwrap();
        let window = b"very-sensitive-value";
        assert!(
            !stored.windows(window.len()).any(|w| w == window),
            "plaintext found in database"
        );
    }

    #[tokio::test]
    async fn test_key_store_overwrite() {
        let pool = test_pool().await;
        let store = VaultKeyStore::new(SqliteKeyRepository::new(pool), test_crypto());

        store.set("KEY", "old").await.unwrap();
        store.set("KEY", "new").await.unwrap();

        assert_eq!(store.get("KEY").await.unwrap().unwrap(), "new");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_key_store_get_missing() {
        let pool = test_pool().await;
        let store = VaultKeyStore::new(SqliteKeyRepository::new(pool), test_crypto());

        assert!(store.get("MISSING").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_key_store_delete_missing() {
        let pool = test_pool().await;
        let store = VaultKeyStore::new(SqliteKeyRepository::new(pool), test_crypto());

        assert!(matches!(
            store.delete("MISSING").await.unwrap_err(),
            StoreError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_key_store_wrong_key_yields_decryption_error() {
        let pool = test_pool().await;
        let store = VaultKeyStore::new(SqliteKeyRepository::new(pool.clone()), test_crypto());
        store.set("KEY", "value").await.unwrap();

        let other = Arc::new(VaultCrypto::new(&[0xAB; 32]));
        let reread = VaultKeyStore::new(SqliteKeyRepository::new(pool), other);

        assert!(matches!(
            reread.get("KEY").await.unwrap_err(),
            StoreError::Decryption
        ));
    }

    #[tokio::test]
    async fn test_note_store_roundtrip() {
        let pool = test_pool().await;
        let store = VaultNoteStore::new(SqliteNoteRepository::new(pool), test_crypto());

        let first = store.add("buy milk").await.unwrap();
        let second = store.add("rotate keys").await.unwrap();
        assert!(second > first);

        let notes = store.list().await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text.as_deref(), Some("buy milk"));
        assert_eq!(notes[1].text.as_deref(), Some("rotate keys"));
    }

    #[tokio::test]
    async fn test_note_store_bad_ciphertext_listed_without_text() {
        let pool = test_pool().await;
        let store = VaultNoteStore::new(SqliteNoteRepository::new(pool.clone()), test_crypto());

        store.add("readable").await.unwrap();

        // Corrupt a second note directly in the database.
        sqlx::query("INSERT INTO notes (ciphertext, created_at) VALUES (?, ?)")
            .bind(&b"garbage bytes, not a valid sealed value"[..])
            .bind("2026-01-01T00:00:00+00:00")
            .execute(&pool.writer)
            .await
            .unwrap();

        let notes = store.list().await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text.as_deref(), Some("readable"));
        assert!(notes[1].text.is_none());

        // The corrupt note can still be deleted.
        store.delete(notes[1].id).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_note_store_delete_missing() {
        let pool = test_pool().await;
        let store = VaultNoteStore::new(SqliteNoteRepository::new(pool), test_crypto());

        assert!(matches!(
            store.delete(NoteId::new(7)).await.unwrap_err(),
            StoreError::NotFound
        ));
    }
}
