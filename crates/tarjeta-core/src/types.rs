//! Core types for the person card
//!
//! [`FormState`] is the transient page state; [`PersonRecord`] is the unit
//! written to the ledger. Records keep the `nombre` / `acepta` keys on the
//! wire so existing ledgers stay readable.

use crate::validation::{is_form_valid, validate_email, validate_name, FieldError};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Favorite color options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Red
    Red,
    /// Yellow
    Yellow,
    /// Green
    Green,
}

impl Color {
    /// All options in display order
    pub const ALL: [Color; 3] = [Color::Red, Color::Yellow, Color::Green];

    /// Human-readable label
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "Rojo",
            Self::Yellow => "Amarillo",
            Self::Green => "Verde",
        }
    }

    /// CSS color name, also the stored value
    #[inline]
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }

    /// Foreground color readable on top of this one
    #[inline]
    #[must_use]
    pub const fn contrast_text(self) -> &'static str {
        match self {
            Self::Yellow => "black",
            Self::Red | Self::Green => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css())
    }
}

/// Unknown color value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color '{0}', expected one of: red, yellow, green")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|c| c.css().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

/// Inline messages under the text fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Verdict for the name field
    pub name: FieldError,
    /// Verdict for the email field
    pub email: FieldError,
}

impl FieldErrors {
    /// True when neither text field carries a message
    #[inline]
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.name.is_empty() && self.email.is_empty()
    }
}

/// Values currently entered in the form
///
/// Created blank, edited in place and reset after a successful save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Name as typed
    pub name: String,
    /// Email as typed
    pub email: String,
    /// Chosen color, `None` while unset
    pub color: Option<Color>,
    /// Terms checkbox
    pub accepted_terms: bool,
    /// Derived field messages
    pub errors: FieldErrors,
}

impl FormState {
    /// Combined validity predicate for this form
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_form_valid(self)
    }
}

/// One saved submission
///
/// Immutable once built. Records come from [`PersonRecord::from_valid_form`]
/// or from decoding, and decoding re-runs the same checks, so a record
/// always holds values that pass validation in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordWire")]
pub struct PersonRecord {
    #[serde(rename = "nombre")]
    name: String,
    email: String,
    color: Color,
    #[serde(rename = "acepta")]
    accepted_terms: bool,
    #[serde(rename = "createdAt", with = "iso_millis")]
    created_at: DateTime<Utc>,
}

impl PersonRecord {
    /// Build a record from a fully valid form
    ///
    /// Returns `None` unless every field passes, a color is chosen and the
    /// terms are accepted. `now` is truncated to milliseconds, the
    /// precision kept on the wire.
    #[must_use]
    pub fn from_valid_form(form: &FormState, now: DateTime<Utc>) -> Option<Self> {
        if !form.is_valid() {
            return None;
        }
        Some(Self {
            name: form.name.clone(),
            email: form.email.clone(),
            color: form.color?,
            accepted_terms: true,
            created_at: now.trunc_subsecs(3),
        })
    }

    /// Name as entered
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email as entered
    #[inline]
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Chosen color
    #[inline]
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Always true for a constructed record
    #[inline]
    #[must_use]
    pub fn accepted_terms(&self) -> bool {
        self.accepted_terms
    }

    /// Submission time as stored, e.g. `2026-10-15T09:30:00.000Z`
    #[must_use]
    pub fn created_at_iso(&self) -> String {
        iso_millis::format(&self.created_at)
    }
}

/// Stored record as found on disk, before validation
#[derive(Deserialize)]
struct RecordWire {
    nombre: String,
    email: String,
    color: Color,
    acepta: bool,
    #[serde(rename = "createdAt", with = "iso_millis")]
    created_at: DateTime<Utc>,
}

/// Stored record that would not pass the form checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRecord {
    /// Name or email fails its validator
    #[error("invalid {field}: {message}")]
    Field {
        /// `nombre` or `email`
        field: &'static str,
        /// Validator message
        message: &'static str,
    },
    /// Terms not accepted
    #[error("terms not accepted")]
    TermsNotAccepted,
}

impl TryFrom<RecordWire> for PersonRecord {
    type Error = InvalidRecord;

    fn try_from(wire: RecordWire) -> Result<Self, Self::Error> {
        for (field, verdict) in [("nombre", validate_name(&wire.nombre)), ("email", validate_email(&wire.email))] {
            if !verdict.is_empty() {
                return Err(InvalidRecord::Field {
                    field,
                    message: verdict.message(),
                });
            }
        }
        if !wire.acepta {
            return Err(InvalidRecord::TermsNotAccepted);
        }
        Ok(Self {
            name: wire.nombre,
            email: wire.email,
            color: wire.color,
            accepted_terms: true,
            created_at: wire.created_at.trunc_subsecs(3),
        })
    }
}

/// `createdAt` codec: RFC 3339 UTC, millisecond precision, `Z` suffix
mod iso_millis {
    use super::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn format(at: &DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub(super) fn serialize<S: Serializer>(at: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format(at))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
