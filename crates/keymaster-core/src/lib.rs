//! Business logic and repository trait definitions for Keymaster.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements. It depends only on `keymaster-types` -- never on
//! `keymaster-infra` or any database/IO crate.

pub mod command;
pub mod repository;
pub mod service;
