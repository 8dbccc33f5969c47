use pretty_assertions::assert_eq;
use tarjeta_core::prelude::*;
use tarjeta_core::{ConfirmPrompt, FileStore, MemoryStore};
use tarjeta_test_utils::{controller, fill_events, fixed_time, record, FixedClock};

#[test]
fn ana_scenario_saves_one_record_and_resets() {
    let store = MemoryStore::new();
    let mut form = controller(&store);

    form.dispatch_all(fill_events("Ana", "ana@correo.com", Color::Green)).unwrap();
    assert!(form.can_submit());

    let shown = form.dispatch(Event::Submit).unwrap();
    assert_eq!(
        shown,
        vec![Notification::Confirm(ConfirmPrompt {
            name: "Ana".into(),
            email: "ana@correo.com".into(),
            color: Color::Green,
        })]
    );
    assert_eq!(form.phase(), Phase::ConfirmPending);

    let shown = form.dispatch(Event::Confirm).unwrap();
    assert_eq!(shown, vec![Notification::Saved { life_ms: 3000 }]);

    let records = form.ledger().records().unwrap();
    assert_eq!(records.len(), 1);
    let saved = &records[0];
    assert_eq!(saved.name(), "Ana");
    assert_eq!(saved.email(), "ana@correo.com");
    assert_eq!(saved.color(), Color::Green);
    assert!(saved.accepted_terms());
    assert_eq!(saved.created_at_iso(), "2026-10-15T09:30:00.000Z");

    assert_eq!(form.form(), &FormState::default());
    assert_eq!(form.phase(), Phase::Editing);
}

#[test]
fn blank_name_blocks_submit_and_leaves_ledger_alone() {
    let store = MemoryStore::new();
    let mut form = controller(&store);

    let mut events = fill_events("Ana", "ana@correo.com", Color::Red);
    events[0] = Event::NameChanged(String::new());
    form.dispatch_all(events).unwrap();
    assert!(!form.can_submit());

    let shown = form.dispatch(Event::Submit).unwrap();
    assert_eq!(shown, vec![Notification::Incomplete]);
    form.dispatch(Event::Confirm).unwrap();

    assert!(store.is_empty());
    assert_eq!(form.form().errors.name.message(), tarjeta_core::validation::NAME_REQUIRED);
}

#[test]
fn second_append_keeps_first_record() {
    let first = record("Ana", "ana@correo.com", Color::Green);
    let seeded = serde_json::to_string(&vec![&first]).unwrap();
    let store = MemoryStore::with_entry("personas", seeded);
    let mut form = controller(&store);

    form.dispatch_all(fill_events("Beto", "beto@correo.com", Color::Yellow)).unwrap();
    form.dispatch_all([Event::Submit, Event::Confirm]).unwrap();

    let records = form.ledger().records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], first);
    assert_eq!(records[1], record("Beto", "beto@correo.com", Color::Yellow));
}

#[test]
fn cancel_leaves_ledger_and_values() {
    let store = MemoryStore::new();
    let mut form = controller(&store);

    form.dispatch_all(fill_events("Ana", "ana@correo.com", Color::Green)).unwrap();
    form.dispatch_all([Event::Submit, Event::Cancel]).unwrap();

    assert!(store.is_empty());
    assert_eq!(form.form().name, "Ana");
    assert!(form.can_submit());
}

#[test]
fn unreadable_ledger_is_replaced_on_save() {
    let store = MemoryStore::with_entry("personas", "not json at all");
    let mut form = controller(&store);

    form.dispatch_all(fill_events("Ana", "ana@correo.com", Color::Green)).unwrap();
    form.dispatch_all([Event::Submit, Event::Confirm]).unwrap();

    assert_eq!(form.ledger().records().unwrap(), vec![record("Ana", "ana@correo.com", Color::Green)]);
}

#[test]
fn strict_policy_surfaces_corrupt_ledger() {
    let store = MemoryStore::with_entry("personas", "not json at all");
    let config = FormConfig::new().with_corrupt_policy(tarjeta_core::CorruptLedgerPolicy::Fail);
    let mut form = FormController::with_clock(&store, &config, FixedClock::default());

    form.dispatch_all(fill_events("Ana", "ana@correo.com", Color::Green)).unwrap();
    form.dispatch(Event::Submit).unwrap();
    let err = form.dispatch(Event::Confirm).unwrap_err();

    assert!(!err.is_recoverable());
    assert_eq!(form.form().name, "Ana");
    assert_eq!(store.get("personas").unwrap().as_deref(), Some("not json at all"));
}

#[test]
fn file_store_ledger_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    for (name, email) in [("Ana", "ana@correo.com"), ("Beto", "beto@correo.com")] {
        let mut form = FormController::with_clock(FileStore::new(&path), &FormConfig::new(), FixedClock(fixed_time()));
        form.dispatch_all(fill_events(name, email, Color::Red)).unwrap();
        form.dispatch_all([Event::Submit, Event::Confirm]).unwrap();
    }

    let ledger = RecordStore::new(FileStore::new(&path));
    let names: Vec<_> = ledger.records().unwrap().iter().map(|r| r.name().to_string()).collect();
    assert_eq!(names, vec!["Ana", "Beto"]);
}
