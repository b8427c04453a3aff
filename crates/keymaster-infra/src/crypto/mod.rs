//! Cryptographic operations: AES-256-GCM vault encryption.

pub mod vault;
