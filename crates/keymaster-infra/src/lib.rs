//! Infrastructure layer for Keymaster.
//!
//! Contains implementations of the repository traits defined in
//! `keymaster-core`: SQLite storage, AES-256-GCM vault encryption, the
//! encrypting store adapters, the Telegram Bot API client, and
//! configuration loading.

pub mod config;
pub mod crypto;
pub mod sqlite;
pub mod store;
pub mod telegram;
