//! Tarjeta Core
//!
//! Person-card form: name, email, favorite color and terms, validated,
//! confirmed and appended to a local record ledger.
//!
//! # Overview
//!
//! - **Validator**: pure field checks ([`validate_name`], [`validate_email`])
//! - **RecordStore**: append-only ledger over an injected [`KeyValueStore`]
//! - **FormMachine**: pure `(state, event) -> (state, effects)` transitions
//! - **FormController**: composition root carrying out the effects
//!
//! # Example
//!
//! ```rust
//! use tarjeta_core::{Color, Event, FormController, MemoryStore, Notification};
//!
//! let mut form = FormController::new(MemoryStore::new());
//! form.dispatch(Event::NameChanged("Ana".into())).unwrap();
//! form.dispatch(Event::EmailChanged("ana@correo.com".into())).unwrap();
//! form.dispatch(Event::ColorChanged(Some(Color::Green))).unwrap();
//! form.dispatch(Event::TermsChanged(true)).unwrap();
//! assert!(form.can_submit());
//!
//! let shown = form.dispatch(Event::Submit).unwrap();
//! assert!(matches!(shown[0], Notification::Confirm(_)));
//!
//! form.dispatch(Event::Confirm).unwrap();
//! assert_eq!(form.ledger().records().unwrap().len(), 1);
//! ```

#![warn(missing_docs)]

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod ledger;
pub mod machine;
pub mod notice;
pub mod preview;
pub mod route;
pub mod store;
pub mod types;
pub mod validation;

// Re-exports
pub use clock::{Clock, SystemClock};
pub use config::{CorruptLedgerPolicy, FormConfig};
pub use controller::FormController;
pub use error::{ConfigError, FormError, LedgerError, StoreError};
pub use ledger::RecordStore;
pub use machine::{Effect, Event, FormMachine, Phase};
pub use notice::{ConfirmPrompt, Notification, Severity};
pub use preview::Preview;
pub use route::Route;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::{Color, FieldErrors, FormState, InvalidRecord, ParseColorError, PersonRecord};
pub use validation::{is_form_valid, validate_email, validate_name, FieldError};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the form
    pub use crate::{
        Color, Event, FormConfig, FormController, FormState, KeyValueStore, Notification, Phase,
        PersonRecord, RecordStore,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
