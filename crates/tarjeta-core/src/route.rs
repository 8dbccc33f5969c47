//! Navigation surface: a landing page and the form page

use std::fmt;

/// Known pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Landing,
    /// `/tarjeta`, the person-card form
    Tarjeta,
}

impl Route {
    /// Resolve a request path
    ///
    /// Query strings and fragments are ignored. `/tarjeta/` is accepted;
    /// anything else, including an empty path, gives `None`.
    #[must_use]
    pub fn resolve(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        match path {
            "/" => Some(Self::Landing),
            "/tarjeta" | "/tarjeta/" => Some(Self::Tarjeta),
            _ => None,
        }
    }

    /// Canonical path
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Tarjeta => "/tarjeta",
        }
    }

    /// Page title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Landing => "Inicio",
            Self::Tarjeta => "Tarjeta de Usuario",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
