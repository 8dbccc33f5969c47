//! Field validation for the person card
//!
//! Both validators are pure and total: any string, including empty or
//! whitespace-only input, yields a verdict. An empty [`FieldError`] means
//! the field passed.

use crate::types::FormState;
use once_cell::sync::Lazy;
use regex::Regex;

/// Message for a blank name
pub const NAME_REQUIRED: &str = "El nombre no puede estar vacío";

/// Message for a blank email
pub const EMAIL_REQUIRED: &str = "El email no puede estar vacío";

/// Message for an email that fails the shape check
pub const EMAIL_MALFORMED: &str = "Ingrese un email válido (ej: ejemplo@correo.com)";

// local@domain.tld with no whitespace and a single '@'. Accepts some invalid
// addresses and rejects some valid ones.
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Verdict for a single field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FieldError(Option<&'static str>);

impl FieldError {
    /// Passing verdict
    pub const NONE: Self = Self(None);

    #[inline]
    const fn new(message: &'static str) -> Self {
        Self(Some(message))
    }

    /// True when the field passed validation
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Message to show under the field, empty string when valid
    #[inline]
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.0.unwrap_or("")
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Validate the name field
///
/// Fails only when the trimmed input is empty. No length or character-set
/// constraint applies.
#[must_use]
pub fn validate_name(raw: &str) -> FieldError {
    if raw.trim().is_empty() {
        return FieldError::new(NAME_REQUIRED);
    }
    FieldError::NONE
}

/// Validate the email field
///
/// Blank input gets [`EMAIL_REQUIRED`]. Otherwise the raw value (not the
/// trimmed one) must match the `local@domain.tld` shape.
#[must_use]
pub fn validate_email(raw: &str) -> FieldError {
    if raw.trim().is_empty() {
        return FieldError::new(EMAIL_REQUIRED);
    }
    if !EMAIL_SHAPE.is_match(raw) {
        return FieldError::new(EMAIL_MALFORMED);
    }
    FieldError::NONE
}

/// Combined validity predicate
///
/// Gates the save action: both text fields pass, a color is chosen and the
/// terms are accepted. Recomputed from the raw values, not from the cached
/// `errors`.
#[must_use]
pub fn is_form_valid(form: &FormState) -> bool {
    validate_name(&form.name).is_empty()
        && validate_email(&form.email).is_empty()
        && form.color.is_some()
        && form.accepted_terms
}
