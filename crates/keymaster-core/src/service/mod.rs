//! Business logic services.

pub mod bot;
