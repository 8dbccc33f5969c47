//! Live card preview shown under the form

use crate::types::FormState;

/// Shown in place of an empty field
pub const PLACEHOLDER: &str = "_______";

/// Rendered preview of the card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// `Nombre: ...` heading
    pub heading: String,
    /// `Contacto: ...` line
    pub contact: String,
    /// Card background, `transparent` until a color is chosen
    pub background: &'static str,
    /// Text color on that background
    pub foreground: &'static str,
}

impl Preview {
    /// Preview for the current form values
    #[must_use]
    pub fn of(form: &FormState) -> Self {
        let or_placeholder = |s: &str| if s.is_empty() { PLACEHOLDER.to_string() } else { s.to_string() };
        Self {
            heading: format!("Nombre: {}", or_placeholder(&form.name)),
            contact: format!("Contacto: {}", or_placeholder(&form.email)),
            background: form.color.map_or("transparent", |c| c.css()),
            foreground: form.color.map_or("white", |c| c.contrast_text()),
        }
    }
}
