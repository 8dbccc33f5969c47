//! Notifications raised by the form
//!
//! These are contracts for the presentation layer: when each dialog or
//! toast appears and what it says. Rendering is up to the caller.

use crate::types::Color;
use std::fmt;

/// Dialog / toast kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Blocking error dialog
    Error,
    /// Blocking confirm/cancel dialog
    Question,
    /// Transient success toast
    Success,
}

/// Summary shown before saving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    /// Name to be saved
    pub name: String,
    /// Email to be saved
    pub email: String,
    /// Chosen color
    pub color: Color,
}

impl ConfirmPrompt {
    /// Confirm button text
    pub const CONFIRM_LABEL: &'static str = "Sí, guardar";
    /// Cancel button text
    pub const CANCEL_LABEL: &'static str = "Cancelar";

    /// Body lines: name, email, color label
    #[must_use]
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Nombre: {}", self.name),
            format!("Email: {}", self.email),
            format!("Color: {}", self.color.label()),
        ]
    }
}

/// Something the user must be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Submit attempted with missing or invalid fields
    Incomplete,
    /// Ask before saving
    Confirm(ConfirmPrompt),
    /// Record saved
    Saved {
        /// Toast lifetime in milliseconds
        life_ms: u64,
    },
}

impl Notification {
    /// Kind of surface to use
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Incomplete => Severity::Error,
            Self::Confirm(_) => Severity::Question,
            Self::Saved { .. } => Severity::Success,
        }
    }

    /// Title or toast summary
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Incomplete => "Formulario incompleto",
            Self::Confirm(_) => "¿Desea confirmar los datos?",
            Self::Saved { .. } => "Guardado",
        }
    }

    /// Body text, one entry per line
    #[must_use]
    pub fn body(&self) -> Vec<String> {
        match self {
            Self::Incomplete => vec![
                "Por favor completa todos los campos obligatorios y acepta los términos".to_string(),
            ],
            Self::Confirm(prompt) => prompt.lines().into(),
            Self::Saved { .. } => vec!["Persona guardada".to_string()],
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())?;
        for line in self.body() {
            write!(f, "\n  {line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_prompt_uses_color_label() {
        let n = Notification::Confirm(ConfirmPrompt {
            name: "Ana".into(),
            email: "ana@correo.com".into(),
            color: Color::Yellow,
        });
        assert_eq!(n.severity(), Severity::Question);
        assert_eq!(n.body(), vec!["Nombre: Ana", "Email: ana@correo.com", "Color: Amarillo"]);
    }

    #[test]
    fn display_renders_title_then_body() {
        let text = Notification::Saved { life_ms: 3000 }.to_string();
        assert_eq!(text, "Guardado\n  Persona guardada");
    }
}
