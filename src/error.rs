//! Error types for document conversion and configuration lookup.

use thiserror::Error;

/// Errors raised while converting parsed input into a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A mapping key was a mapping or a sequence.
    #[error("unsupported mapping key {0}: only scalar keys are supported")]
    UnsupportedKey(String),
}

/// Errors raised by the configuration components.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Section '{0}' not found")]
    SectionNotFound(String),

    #[error("Key '{key}' not found in section '{section}'")]
    KeyNotFound { section: String, key: String },

    #[error("Secret store access required for '{0}' but no secret store is configured")]
    SecretStoreUnavailable(String),

    #[error("Missing vault_path in section '{0}'")]
    MissingVaultPath(String),

    #[error("Missing secret namespace for section '{0}'")]
    MissingNamespace(String),

    #[error("Failed to fetch '{key}' from secret store: {source}")]
    Secret {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
