//! Record ledger
//!
//! All saved records live as one JSON array under a single storage key.
//! Saving is read, push, write back: O(n) per save, no identifiers, no
//! deduplication, insertion order only.

use crate::config::{CorruptLedgerPolicy, FormConfig, DEFAULT_STORAGE_KEY};
use crate::error::LedgerError;
use crate::store::KeyValueStore;
use crate::types::PersonRecord;
use serde_json::Value;

/// Append-only view over the ledger key
#[derive(Debug)]
pub struct RecordStore<S> {
    store: S,
    key: String,
    policy: CorruptLedgerPolicy,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Ledger under the default `personas` key, discarding unreadable content
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: DEFAULT_STORAGE_KEY.to_string(),
            policy: CorruptLedgerPolicy::default(),
        }
    }

    /// Ledger configured from `config`
    #[must_use]
    pub fn with_config(store: S, config: &FormConfig) -> Self {
        Self {
            store,
            key: config.storage_key.clone(),
            policy: config.on_corrupt_ledger,
        }
    }

    /// Storage key
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Append one record
    ///
    /// Prior elements are written back untouched, whatever their shape.
    /// Not atomic: a concurrent writer between the read and the write loses
    /// its record.
    pub fn append(&self, record: &PersonRecord) -> Result<(), LedgerError> {
        let mut entries = self.load_entries()?;
        entries.push(serde_json::to_value(record)?);

        let encoded = serde_json::to_string(&entries)?;
        self.store.set(&self.key, &encoded)?;

        tracing::debug!(key = %self.key, len = entries.len(), "ledger appended");
        Ok(())
    }

    /// Records currently in the ledger, oldest first
    ///
    /// Elements that do not decode as a valid [`PersonRecord`] are skipped
    /// but left in storage.
    pub fn records(&self) -> Result<Vec<PersonRecord>, LedgerError> {
        let entries = self.load_entries()?;
        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value(entry) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(key = %self.key, index, error = %e, "skipping unreadable ledger entry"),
            }
        }
        Ok(records)
    }

    fn load_entries(&self) -> Result<Vec<Value>, LedgerError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => match self.policy {
                CorruptLedgerPolicy::Discard => {
                    tracing::warn!(key = %self.key, error = %e, "discarding unreadable ledger");
                    Ok(Vec::new())
                }
                CorruptLedgerPolicy::Fail => Err(LedgerError::Corrupt {
                    key: self.key.clone(),
                    reason: e.to_string(),
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::{Color, FormState};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn record(name: &str) -> PersonRecord {
        let form = FormState {
            name: name.into(),
            email: format!("{}@correo.com", name.to_lowercase()),
            color: Some(Color::Red),
            accepted_terms: true,
            ..FormState::default()
        };
        PersonRecord::from_valid_form(&form, Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()).unwrap()
    }

    #[test]
    fn append_to_empty_round_trips() {
        let ledger = RecordStore::new(MemoryStore::new());
        let r = record("Ana");
        ledger.append(&r).unwrap();
        assert_eq!(ledger.records().unwrap(), vec![r]);
    }

    #[test]
    fn append_preserves_order() {
        let ledger = RecordStore::new(MemoryStore::new());
        let (a, b) = (record("Ana"), record("Beto"));
        ledger.append(&a).unwrap();
        ledger.append(&b).unwrap();
        assert_eq!(ledger.records().unwrap(), vec![a, b]);
    }

    #[test]
    fn corrupt_ledger_discarded_by_default() {
        let store = MemoryStore::with_entry("personas", "{not json");
        let ledger = RecordStore::new(&store);
        ledger.append(&record("Ana")).unwrap();

        let raw = store.get("personas").unwrap().unwrap();
        let entries: Vec<Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn non_array_ledger_discarded_by_default() {
        let store = MemoryStore::with_entry("personas", r#"{"nombre":"x"}"#);
        RecordStore::new(&store).append(&record("Ana")).unwrap();
        assert_eq!(RecordStore::new(&store).records().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_ledger_fails_under_strict_policy() {
        let store = MemoryStore::with_entry("personas", "garbage");
        let config = FormConfig::new().with_corrupt_policy(CorruptLedgerPolicy::Fail);
        let ledger = RecordStore::with_config(&store, &config);

        let err = ledger.append(&record("Ana")).unwrap_err();
        assert!(matches!(err, LedgerError::Corrupt { .. }));
        assert_eq!(store.get("personas").unwrap().as_deref(), Some("garbage"));
    }

    #[test]
    fn foreign_entries_kept_verbatim() {
        let prior = r#"[{"nombre":"Old","extra":42}]"#;
        let store = MemoryStore::with_entry("personas", prior);
        let ledger = RecordStore::new(&store);
        ledger.append(&record("Ana")).unwrap();

        let raw = store.get("personas").unwrap().unwrap();
        let entries: Vec<Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(entries[0], serde_json::json!({"nombre": "Old", "extra": 42}));
        // The foreign entry is skipped on read, not dropped from storage.
        assert_eq!(ledger.records().unwrap().len(), 1);
    }

    #[test]
    fn invalid_stored_record_skipped_on_read() {
        let prior = r#"[{"nombre":"  ","email":"nope","color":"red","acepta":false,"createdAt":"2026-10-15T09:30:00.000Z"}]"#;
        let store = MemoryStore::with_entry("personas", prior);
        let ledger = RecordStore::new(&store);
        assert!(ledger.records().unwrap().is_empty());

        let r = record("Ana");
        ledger.append(&r).unwrap();
        assert_eq!(ledger.records().unwrap(), vec![r]);

        let raw = store.get("personas").unwrap().unwrap();
        let entries: Vec<Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["acepta"], serde_json::json!(false));
    }

    #[test]
    fn custom_key_is_used() {
        let store = MemoryStore::new();
        let config = FormConfig::new().with_storage_key("otra");
        RecordStore::with_config(&store, &config).append(&record("Ana")).unwrap();
        assert!(store.get("personas").unwrap().is_none());
        assert!(store.get("otra").unwrap().is_some());
    }
}
