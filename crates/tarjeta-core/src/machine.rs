//! Form state machine
//!
//! `Editing` is the only resting phase. A valid submit moves to
//! `ConfirmPending`; confirm or cancel comes back. Transitions are pure:
//! [`FormMachine::step`] returns the next machine plus the effects the
//! caller must carry out, and never touches storage itself.

use crate::config::DEFAULT_TOAST_LIFE_MS;
use crate::notice::{ConfirmPrompt, Notification};
use crate::types::{Color, FieldErrors, FormState, PersonRecord};
use crate::validation::{validate_email, validate_name};
use chrono::{DateTime, Utc};

/// Where the form is in its flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Fields are editable
    #[default]
    Editing,
    /// Confirmation dialog is open; edits are blocked
    ConfirmPending,
}

/// User interface events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Name input changed
    NameChanged(String),
    /// Email input changed
    EmailChanged(String),
    /// Color selection changed (`None` deselects)
    ColorChanged(Option<Color>),
    /// Terms checkbox toggled
    TermsChanged(bool),
    /// Save button pressed
    Submit,
    /// Confirmation accepted
    Confirm,
    /// Confirmation declined
    Cancel,
    /// Clear button pressed
    Clear,
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show a notification
    Notify(Notification),
    /// Append a record to the ledger
    Persist(PersonRecord),
}

/// Form state plus flow phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMachine {
    form: FormState,
    phase: Phase,
    toast_life_ms: u64,
}

impl Default for FormMachine {
    fn default() -> Self {
        Self {
            form: FormState::default(),
            phase: Phase::Editing,
            toast_life_ms: DEFAULT_TOAST_LIFE_MS,
        }
    }
}

impl FormMachine {
    /// Blank form in `Editing`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With success toast lifetime
    #[inline]
    #[must_use]
    pub fn with_toast_life(mut self, life_ms: u64) -> Self {
        self.toast_life_ms = life_ms;
        self
    }

    /// Current field values
    #[inline]
    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Current phase
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the save button is enabled
    #[inline]
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Editing && self.form.is_valid()
    }

    /// Apply one event
    ///
    /// Events that make no sense in the current phase (edits while the
    /// confirmation is open, confirm/cancel while editing) leave the
    /// machine unchanged and produce no effects.
    #[must_use]
    pub fn step(mut self, event: Event, now: DateTime<Utc>) -> (Self, Vec<Effect>) {
        let mut effects = Vec::new();

        match (self.phase, event) {
            (Phase::Editing, Event::NameChanged(v)) => {
                self.form.errors.name = validate_name(&v);
                self.form.name = v;
            }
            (Phase::Editing, Event::EmailChanged(v)) => {
                self.form.errors.email = validate_email(&v);
                self.form.email = v;
            }
            (Phase::Editing, Event::ColorChanged(c)) => self.form.color = c,
            (Phase::Editing, Event::TermsChanged(b)) => self.form.accepted_terms = b,
            (Phase::Editing, Event::Clear) => self.form = FormState::default(),

            (Phase::Editing, Event::Submit) => {
                // Re-check in case the cached errors went stale.
                self.form.errors = FieldErrors {
                    name: validate_name(&self.form.name),
                    email: validate_email(&self.form.email),
                };
                match (self.form.errors.is_clear(), self.form.color, self.form.accepted_terms) {
                    (true, Some(color), true) => {
                        self.phase = Phase::ConfirmPending;
                        effects.push(Effect::Notify(Notification::Confirm(ConfirmPrompt {
                            name: self.form.name.clone(),
                            email: self.form.email.clone(),
                            color,
                        })));
                    }
                    _ => effects.push(Effect::Notify(Notification::Incomplete)),
                }
            }

            (Phase::ConfirmPending, Event::Cancel) => self.phase = Phase::Editing,
            (Phase::ConfirmPending, Event::Confirm) => {
                self.phase = Phase::Editing;
                match PersonRecord::from_valid_form(&self.form, now) {
                    Some(record) => {
                        effects.push(Effect::Persist(record));
                        effects.push(Effect::Notify(Notification::Saved {
                            life_ms: self.toast_life_ms,
                        }));
                        self.form = FormState::default();
                    }
                    // Unreachable while edits are blocked in ConfirmPending.
                    None => effects.push(Effect::Notify(Notification::Incomplete)),
                }
            }

            (phase, event) => {
                tracing::trace!(?phase, ?event, "event ignored");
            }
        }

        (self, effects)
    }
}
