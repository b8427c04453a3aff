//! Repository trait definitions ("ports") implemented by the infrastructure layer.

pub mod key;
pub mod note;
