//! AES-256-GCM vault encryption for keys and notes at rest.
//!
//! VaultCrypto provides symmetric encryption using AES-256-GCM with random
//! nonces. The master key arrives as a base64-encoded 32-byte value (the
//! format Fernet tooling generates, so keys produced by
//! `Fernet.generate_key()` equivalents work unchanged) or as raw bytes.
//!
//! Encrypted format: `nonce (12 bytes) || ciphertext`
//!
//! SECURITY: Error types never contain plaintext or key material.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::Engine;
use thiserror::Error;

/// Nonce size for AES-256-GCM (96 bits / 12 bytes).
const NONCE_SIZE: usize = 12;

/// Errors from vault encryption operations.
///
/// IMPORTANT: These errors never include plaintext, key material, or
/// ciphertext in their Display/Debug output to prevent accidental logging
/// of secrets.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("encryption failed")]
    EncryptionFailed,

    #[error("decryption failed")]
    DecryptionFailed,

    #[error("invalid ciphertext: too short")]
    CiphertextTooShort,

    #[error("invalid master key: not valid base64")]
    KeyNotBase64,

    #[error("invalid master key: expected 32 bytes, got {0}")]
    KeyWrongLength(usize),
}

/// AES-256-GCM encryption for values at rest.
///
/// Each encryption call generates a random 12-byte nonce, prepended to the
/// ciphertext. This means encrypting the same plaintext twice produces
/// different output.
pub struct VaultCrypto {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for VaultCrypto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultCrypto").finish_non_exhaustive()
    }
}

impl VaultCrypto {
    /// Create a new VaultCrypto from a raw 32-byte key.
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            cipher: Aes256Gcm::new(key.into()),
        }
    }

    /// Create a VaultCrypto from a base64-encoded 32-byte key.
    ///
    /// Accepts both the url-safe alphabet (what Fernet key generators emit)
    /// and the standard alphabet, with or without padding.
    pub fn from_base64_key(encoded: &str) -> Result<Self, VaultError> {
        let encoded = encoded.trim().trim_end_matches('=');
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(encoded)
            .or_else(|_| base64::engine::general_purpose::STANDARD_NO_PAD.decode(encoded))
            .map_err(|_| VaultError::KeyNotBase64)?;

        let key: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| VaultError::KeyWrongLength(bytes.len()))?;
        Ok(Self::new(&key))
    }

    /// Generate a fresh random master key, base64-encoded (url-safe).
    ///
    /// Used by the `genkey` CLI command.
    pub fn generate_key() -> String {
        use aes_gcm::aead::rand_core::RngCore;
        let mut key = [0u8; 32];
        OsRng.fill_bytes(&mut key);
        base64::engine::general_purpose::URL_SAFE.encode(key)
    }

    /// Encrypt plaintext using AES-256-GCM with a random nonce.
    ///
    /// Returns `nonce (12 bytes) || ciphertext`. Each call generates a
    /// fresh random nonce, so encrypting the same plaintext twice always
    /// produces different output.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, VaultError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| VaultError::EncryptionFailed)?;

        // Prepend nonce to ciphertext
        let mut result = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        result.extend_from_slice(&nonce);
        result.extend_from_slice(&ciphertext);
        Ok(result)
    }

    /// Decrypt data produced by `encrypt()`.
    ///
    /// Expects `nonce (12 bytes) || ciphertext` format.
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, VaultError> {
        if data.len() < NONCE_SIZE {
            return Err(VaultError::CiphertextTooShort);
        }

        let (nonce_bytes, ciphertext) = data.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);

        self.cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| VaultError::DecryptionFailed)
    }
}
