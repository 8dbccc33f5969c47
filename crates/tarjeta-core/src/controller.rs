//! Form controller
//!
//! Composition root for the page: owns the [`FormMachine`], feeds it the
//! clock, carries out its effects against the ledger and hands the
//! resulting notifications back to the presentation layer.

use crate::clock::{Clock, SystemClock};
use crate::config::FormConfig;
use crate::error::FormError;
use crate::ledger::RecordStore;
use crate::machine::{Effect, Event, FormMachine, Phase};
use crate::notice::Notification;
use crate::preview::Preview;
use crate::store::KeyValueStore;
use crate::types::FormState;

/// Drives the person-card form
#[derive(Debug)]
pub struct FormController<S, C = SystemClock> {
    machine: FormMachine,
    ledger: RecordStore<S>,
    clock: C,
}

impl<S: KeyValueStore> FormController<S> {
    /// Controller over `store` with default configuration and the wall clock
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_config(store, &FormConfig::default())
    }

    /// Controller configured from `config`
    #[must_use]
    pub fn with_config(store: S, config: &FormConfig) -> Self {
        Self::with_clock(store, config, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> FormController<S, C> {
    /// Controller with an explicit clock
    #[must_use]
    pub fn with_clock(store: S, config: &FormConfig, clock: C) -> Self {
        Self {
            machine: FormMachine::new().with_toast_life(config.toast_life_ms),
            ledger: RecordStore::with_config(store, config),
            clock,
        }
    }

    /// Handle one UI event
    ///
    /// Returns the notifications to show, in order. When the save fails the
    /// form keeps the values the user confirmed, the phase returns to
    /// `Editing` and the storage error is returned instead.
    pub fn dispatch(&mut self, event: Event) -> Result<Vec<Notification>, FormError> {
        match &event {
            Event::NameChanged(_) | Event::EmailChanged(_) | Event::ColorChanged(_) | Event::TermsChanged(_) => {
                tracing::debug!(?event, "field changed");
            }
            _ => tracing::debug!(?event, phase = ?self.machine.phase(), "form event"),
        }

        let previous = self.machine.clone();
        let (next, effects) = std::mem::take(&mut self.machine).step(event, self.clock.now());
        self.machine = next;

        let mut notifications = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                Effect::Persist(record) => {
                    if let Err(e) = self.ledger.append(&record) {
                        tracing::error!(error = %e, "failed to save record");
                        self.machine = previous.step(Event::Cancel, self.clock.now()).0;
                        return Err(e.into());
                    }
                    tracing::info!(key = %self.ledger.key(), created_at = %record.created_at_iso(), "record saved");
                }
                Effect::Notify(Notification::Incomplete) => {
                    tracing::warn!("submit blocked: form incomplete");
                    notifications.push(Notification::Incomplete);
                }
                Effect::Notify(n) => notifications.push(n),
            }
        }
        Ok(notifications)
    }

    /// Apply several events, collecting every notification
    pub fn dispatch_all(
        &mut self,
        events: impl IntoIterator<Item = Event>,
    ) -> Result<Vec<Notification>, FormError> {
        let mut all = Vec::new();
        for event in events {
            all.extend(self.dispatch(event)?);
        }
        Ok(all)
    }

    /// Current field values
    #[inline]
    #[must_use]
    pub fn form(&self) -> &FormState {
        self.machine.form()
    }

    /// Current phase
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    /// Whether the save button is enabled
    #[inline]
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.machine.can_submit()
    }

    /// Card preview for the current values
    #[must_use]
    pub fn preview(&self) -> Preview {
        Preview::of(self.machine.form())
    }

    /// Record ledger
    #[inline]
    #[must_use]
    pub fn ledger(&self) -> &RecordStore<S> {
        &self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;
    use crate::types::Color;
    use std::path::PathBuf;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: PathBuf::from("broken"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            })
        }
    }

    fn fill() -> Vec<Event> {
        vec![
            Event::NameChanged("Ana".into()),
            Event::EmailChanged("ana@correo.com".into()),
            Event::ColorChanged(Some(Color::Red)),
            Event::TermsChanged(true),
        ]
    }

    #[test]
    fn save_failure_keeps_values() {
        let mut controller = FormController::new(BrokenStore);
        controller.dispatch_all(fill()).unwrap();
        controller.dispatch(Event::Submit).unwrap();

        let err = controller.dispatch(Event::Confirm).unwrap_err();
        assert!(matches!(err, FormError::Ledger(_)));
        assert_eq!(controller.phase(), Phase::Editing);
        assert_eq!(controller.form().name, "Ana");
        assert!(controller.can_submit());
    }

    #[test]
    fn preview_follows_edits() {
        let mut controller = FormController::new(MemoryStore::new());
        controller.dispatch(Event::NameChanged("Ana".into())).unwrap();
        assert_eq!(controller.preview().heading, "Nombre: Ana");
    }
}
