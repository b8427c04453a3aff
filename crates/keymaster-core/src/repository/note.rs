//! Note store trait definition.

use keymaster_types::error::StoreError;
use keymaster_types::note::{Note, NoteId};

/// Trait for encrypted note storage.
///
/// Like [`super::key::KeyProvider`], implementations encrypt on write and
/// decrypt on read; the storage layer only ever sees ciphertext.
pub trait NoteProvider: Send + Sync {
    /// Encrypt and store a note, returning its freshly assigned ID.
    /// IDs are monotonic and never reused.
    fn add(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<NoteId, StoreError>> + Send;

    /// List all notes in ID order, decrypted. A note whose ciphertext fails
    /// authentication is returned with `text: None` rather than failing the
    /// whole listing.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Note>, StoreError>> + Send;

    /// Delete a note by ID. Returns `StoreError::NotFound` when absent.
    fn delete(
        &self,
        id: NoteId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
