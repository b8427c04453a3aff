use thiserror::Error;

/// Errors from repository operations (used by trait definitions in `keymaster-core`).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from the encrypted key/note stores.
///
/// These never include plaintext, key material, or ciphertext in their
/// Display output to prevent accidental logging of secrets.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("entry not found")]
    NotFound,

    #[error("encryption failed")]
    Encryption,

    #[error("decryption failed")]
    Decryption,

    #[error("invalid stored value: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },
}
