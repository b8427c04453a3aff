//! SQLite API key repository.
//!
//! Stores encrypted key values as BLOB in the `api_keys` table -- the
//! encryption/decryption is handled by the caller (the vault store in
//! `crate::store`). This repository stores and retrieves raw ciphertext
//! bytes and never logs them.

use chrono::{DateTime, Utc};
use sqlx::Row;

use keymaster_types::error::RepositoryError;
use keymaster_types::key::{KeyEntry, KeyName};

use super::pool::DatabasePool;

/// SQLite-backed ciphertext storage for API keys.
pub struct SqliteKeyRepository {
    pool: DatabasePool,
}

impl SqliteKeyRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Fetch the ciphertext stored under `name`, if any.
    pub async fn get(&self, name: &str) -> Result<Option<Vec<u8>>, RepositoryError> {
        let row = sqlx::query("SELECT ciphertext FROM api_keys WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let ciphertext: Vec<u8> = row
                    .try_get("ciphertext")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(ciphertext))
            }
            None => Ok(None),
        }
    }

    /// Store ciphertext under `name`, overwriting any existing entry.
    pub async fn upsert(&self, name: &str, ciphertext: &[u8]) -> Result<(), RepositoryError> {
        let now = format_datetime(&Utc::now());

        sqlx::query(
            "INSERT INTO api_keys (name, ciphertext, created_at, updated_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(name) DO UPDATE SET ciphertext = excluded.ciphertext, updated_at = excluded.updated_at",
        )
        .bind(name)
        .bind(ciphertext)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    /// Delete the entry named `name`. Errors with `NotFound` when absent.
    pub async fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM api_keys WHERE name = ?")
            .bind(name)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List all entries (metadata only, no ciphertext), sorted by name.
    pub async fn list(&self) -> Result<Vec<KeyEntry>, RepositoryError> {
        let rows = sqlx::query("SELECT name, created_at, updated_at FROM api_keys ORDER BY name")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let name: String = row
                .try_get("name")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let created_at_str: String = row
                .try_get("created_at")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let updated_at_str: String = row
                .try_get("updated_at")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

            entries.push(KeyEntry {
                name: KeyName::new(name),
                created_at: parse_datetime(&created_at_str)?,
                updated_at: parse_datetime(&updated_at_str)?,
            });
        }

        Ok(entries)
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
