//! Testing utilities for the tarjeta workspace
//!
//! Shared fixtures: a fixed clock, filled forms and ready-made records.

#![allow(missing_docs)]

use chrono::{DateTime, TimeZone, Utc};
use tarjeta_core::{Clock, Color, Event, FormConfig, FormController, FormState, MemoryStore, PersonRecord};

/// 2026-10-15T09:30:00.000Z
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 15, 9, 30, 0).unwrap()
}

/// Clock that never moves
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(fixed_time())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Events that fill every field with valid values
pub fn fill_events(name: &str, email: &str, color: Color) -> Vec<Event> {
    vec![
        Event::NameChanged(name.to_string()),
        Event::EmailChanged(email.to_string()),
        Event::ColorChanged(Some(color)),
        Event::TermsChanged(true),
    ]
}

/// A fully valid form
pub fn valid_form(name: &str, email: &str, color: Color) -> FormState {
    FormState {
        name: name.to_string(),
        email: email.to_string(),
        color: Some(color),
        accepted_terms: true,
        ..FormState::default()
    }
}

/// Record for `valid_form(name, email, color)` at [`fixed_time`]
pub fn record(name: &str, email: &str, color: Color) -> PersonRecord {
    PersonRecord::from_valid_form(&valid_form(name, email, color), fixed_time()).unwrap()
}

/// Controller over a borrowed in-memory store with the fixed clock
pub fn controller(store: &MemoryStore) -> FormController<&MemoryStore, FixedClock> {
    FormController::with_clock(store, &FormConfig::default(), FixedClock::default())
}
