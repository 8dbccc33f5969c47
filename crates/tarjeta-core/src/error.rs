//! Error types for the tarjeta core
//!
//! Validation failures are not errors here: they are carried as
//! [`FieldError`](crate::validation::FieldError) messages and surfaced as
//! notifications. The types below cover the storage seam and configuration.

use std::path::PathBuf;

/// Main tarjeta error type
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Record ledger could not be read or written
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl FormError {
    /// Whether the page can keep running after this error
    ///
    /// Nothing in the form is fatal; a corrupt ledger under the strict
    /// policy is the only case that needs operator attention.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Ledger(LedgerError::Corrupt { .. }))
    }
}

/// Failures of the injected key-value capability
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backing file could not be read or written
    #[error("i/o error on {path}: {source}")]
    Io {
        /// File backing the store
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Backing file is not a JSON object of strings
    #[error("store file {path} is not a key-value map: {source}")]
    Format {
        /// File backing the store
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Map could not be serialized
    #[error("failed to encode store: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Record ledger errors
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Key holds content that is not a record sequence (strict policy only)
    #[error("ledger under key '{key}' is not a record sequence: {reason}")]
    Corrupt {
        /// Storage key
        key: String,
        /// Parser message
        reason: String,
    },

    /// Record could not be serialized
    #[error("failed to encode ledger: {0}")]
    Encode(#[from] serde_json::Error),

    /// Underlying store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config content is not valid TOML for [`FormConfig`](crate::config::FormConfig)
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is not usable
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}
