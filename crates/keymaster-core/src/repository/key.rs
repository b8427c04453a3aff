//! Key store trait definition.

use keymaster_types::error::StoreError;
use keymaster_types::key::KeyEntry;

/// Trait for encrypted API key storage.
///
/// Implementations handle encryption internally: `set` receives plaintext
/// and must encrypt before persisting; `get` decrypts before returning.
/// Plaintext never reaches the storage layer.
pub trait KeyProvider: Send + Sync {
    /// Retrieve and decrypt a key value by name.
    /// Returns `None` if no key with that name exists.
    /// Returns `StoreError::Decryption` when the ciphertext fails authentication.
    fn get(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Encrypt and store a key value. Overwrites an existing entry with the
    /// same name.
    fn set(
        &self,
        name: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Delete a key. Returns `StoreError::NotFound` when absent.
    fn delete(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// List all key entries (metadata only, no values), sorted by name.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<KeyEntry>, StoreError>> + Send;
}
