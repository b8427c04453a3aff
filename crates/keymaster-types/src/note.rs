use serde::{Deserialize, Serialize};

use std::fmt;

/// A note identifier, assigned monotonically at creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoteId(pub i64);

impl NoteId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A decrypted note as returned to the owner.
///
/// `text` is `None` when the stored ciphertext failed authentication --
/// the note still appears in listings so the owner can delete it.
#[derive(Debug, Clone)]
pub struct Note {
    pub id: NoteId,
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_id_display() {
        assert_eq!(NoteId::new(42).to_string(), "42");
    }

    #[test]
    fn test_note_id_ordering() {
        assert!(NoteId::new(1) < NoteId::new(2));
    }
}
