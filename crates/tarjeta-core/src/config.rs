//! Form configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no
//! file at all) gives the stock behavior.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Key the ledger lives under
pub const DEFAULT_STORAGE_KEY: &str = "personas";

/// Default backing file for [`FileStore`](crate::store::FileStore)
pub const DEFAULT_LEDGER_PATH: &str = "tarjeta-store.json";

/// Default lifetime of the success toast
pub const DEFAULT_TOAST_LIFE_MS: u64 = 3000;

/// What to do when the ledger key holds something that is not a record list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptLedgerPolicy {
    /// Treat it as an empty ledger and overwrite on the next save
    #[default]
    Discard,
    /// Refuse to save
    Fail,
}

/// Tarjeta configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    /// Storage key holding the ledger
    pub storage_key: String,
    /// File used by the file-backed store
    pub ledger_path: PathBuf,
    /// Handling of unreadable ledger content
    pub on_corrupt_ledger: CorruptLedgerPolicy,
    /// Success toast lifetime in milliseconds
    pub toast_life_ms: u64,
}

impl FormConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With storage key
    #[inline]
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// With ledger file
    #[inline]
    #[must_use]
    pub fn with_ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = path.into();
        self
    }

    /// With corrupt-ledger policy
    #[inline]
    #[must_use]
    pub fn with_corrupt_policy(mut self, policy: CorruptLedgerPolicy) -> Self {
        self.on_corrupt_ledger = policy;
        self
    }

    /// Parse and validate TOML content
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "storage_key",
                reason: "must not be blank".to_string(),
            });
        }
        if self.ledger_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                field: "ledger_path",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            on_corrupt_ledger: CorruptLedgerPolicy::Discard,
            toast_life_ms: DEFAULT_TOAST_LIFE_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(FormConfig::from_toml_str("").unwrap(), FormConfig::default());
    }

    #[test]
    fn overrides_apply() {
        let config = FormConfig::from_toml_str(
            r#"
            storage_key = "personas-test"
            on_corrupt_ledger = "fail"
            toast_life_ms = 1500
            "#,
        )
        .unwrap();
        assert_eq!(config.storage_key, "personas-test");
        assert_eq!(config.on_corrupt_ledger, CorruptLedgerPolicy::Fail);
        assert_eq!(config.toast_life_ms, 1500);
        assert_eq!(config.ledger_path, PathBuf::from(DEFAULT_LEDGER_PATH));
    }

    #[test]
    fn blank_key_and_unknown_fields_rejected() {
        assert!(matches!(
            FormConfig::from_toml_str(r#"storage_key = " ""#),
            Err(ConfigError::Invalid { field: "storage_key", .. })
        ));
        assert!(matches!(
            FormConfig::from_toml_str("colour = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FormConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
