//! SQLite note repository.
//!
//! Notes are stored as encrypted BLOBs with an AUTOINCREMENT integer id so
//! that ids of deleted notes are never reused. Decryption happens in the
//! vault store layer, not here.

use chrono::Utc;
use sqlx::Row;

use keymaster_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed ciphertext storage for notes.
pub struct SqliteNoteRepository {
    pool: DatabasePool,
}

impl SqliteNoteRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Insert a new note ciphertext, returning the assigned id.
    pub async fn insert(&self, ciphertext: &[u8]) -> Result<i64, RepositoryError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query("INSERT INTO notes (ciphertext, created_at) VALUES (?, ?)")
            .bind(ciphertext)
            .bind(&now)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.last_insert_rowid())
    }

    /// List all notes as `(id, ciphertext)` pairs, ordered by id.
    pub async fn list(&self) -> Result<Vec<(i64, Vec<u8>)>, RepositoryError> {
        let rows = sqlx::query("SELECT id, ciphertext FROM notes ORDER BY id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut notes = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: i64 = row
                .try_get("id")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let ciphertext: Vec<u8> = row
                .try_get("ciphertext")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            notes.push((id, ciphertext));
        }

        Ok(notes)
    }

    /// Delete the note with the given id. Errors with `NotFound` when absent.
    pub async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
