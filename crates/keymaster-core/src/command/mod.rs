//! Bot command surface: parsing and dispatch.

pub mod parser;

pub use parser::{parse_command, Command, Parsed};
