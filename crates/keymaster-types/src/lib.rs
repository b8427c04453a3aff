//! Shared domain types for Keymaster.
//!
//! This crate contains the core domain types used across the Keymaster bot:
//! API key entries, notes, Telegram wire types, configuration, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod key;
pub mod note;
pub mod telegram;
