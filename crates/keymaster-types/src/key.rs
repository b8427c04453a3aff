use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

/// A stored API key name (e.g., "ANTHROPIC_API_KEY").
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyName(pub String);

impl KeyName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Debug for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyName(\"{}\")", self.0)
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata about a stored API key (the value itself is never in this struct).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyEntry {
    /// The key name (e.g., "ANTHROPIC_API_KEY").
    pub name: KeyName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A wrapper that redacts secret values in Debug and Display output.
///
/// Use this to wrap any `String` that might contain sensitive data
/// (the bot token, the master key). The actual value is accessible
/// via `.expose()`. Deliberately not `Serialize`: a serialized form
/// would emit the raw secret.
#[derive(Clone, Deserialize)]
pub struct Redacted(String);

impl Redacted {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the underlying secret value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Show masked representation: last 4 chars visible.
    pub fn masked(&self) -> String {
        if self.0.len() <= 4 {
            "****".to_string()
        } else {
            format!("****{}", &self.0[self.0.len() - 4..])
        }
    }
}

impl fmt::Debug for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Redacted(\"***\")")
    }
}

impl fmt::Display for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_debug_hides_value() {
        let secret = Redacted::new("sk-abc123xyz");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("abc123xyz"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn test_redacted_display_hides_value() {
        let secret = Redacted::new("sk-abc123xyz");
        let display = format!("{}", secret);
        assert!(!display.contains("abc123xyz"));
    }

    #[test]
    fn test_redacted_expose() {
        let secret = Redacted::new("sk-abc123xyz");
        assert_eq!(secret.expose(), "sk-abc123xyz");
    }

    #[test]
    fn test_redacted_masked() {
        let secret = Redacted::new("sk-abc123xyz");
        assert_eq!(secret.masked(), "****3xyz");
    }

    #[test]
    fn test_redacted_masked_short() {
        let secret = Redacted::new("ab");
        assert_eq!(secret.masked(), "****");
    }

    #[test]
    fn test_key_name_display() {
        let name = KeyName::new("OPENAI_API_KEY");
        assert_eq!(name.to_string(), "OPENAI_API_KEY");
    }
}
