//! Telegram Bot API client.

pub mod client;
