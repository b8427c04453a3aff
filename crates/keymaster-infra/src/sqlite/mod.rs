//! SQLite storage implementations.

pub mod key;
pub mod note;
pub mod pool;
