//! Committing options and the notifications it produces.

use std::sync::{Arc, Mutex};

use lookup::{
    CatalogSearch, Lookup, LookupConfig, LookupError, LookupEvent, LookupEventKind, LookupHost,
    OptionEntry, ResultRecord, SearchCompletion,
};

#[derive(Clone, Default)]
struct ButtonHost {
    buttons: Arc<Mutex<Vec<String>>>,
    focused: Arc<Mutex<usize>>,
    closed: Arc<Mutex<usize>>,
}

impl LookupHost for ButtonHost {
    fn render_options(&self, _entries: &[OptionEntry]) {}

    fn refresh_list(&self) {}

    fn focus_search(&self) {
        *self.focused.lock().unwrap() += 1;
    }

    fn render_button(&self, label: &str) {
        self.buttons.lock().unwrap().push(label.to_string());
    }

    fn close_list(&self) {
        *self.closed.lock().unwrap() += 1;
    }
}

fn catalog() -> CatalogSearch {
    CatalogSearch::new(vec![
        ResultRecord::new(1, "Alpha"),
        ResultRecord::new(2, "Abacus"),
        ResultRecord::new(5, "Abcdef"),
        ResultRecord::new(7, "Zurich"),
    ])
}

fn recorded(lookup: &Lookup) -> Arc<Mutex<Vec<LookupEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    lookup.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
    events
}

fn kinds(events: &Arc<Mutex<Vec<LookupEvent>>>) -> Vec<LookupEventKind> {
    events.lock().unwrap().iter().map(|e| e.kind()).collect()
}

// ============================================================================
// Commit
// ============================================================================

#[test]
fn test_commit_resolves_record_and_fires_select_and_change() {
    let lookup = Lookup::new(
        LookupConfig::new()
            .search(catalog())
            .auto_select_first_result(false),
    );
    lookup.open();
    lookup.on_search_input("abcd");
    assert_eq!(lookup.options().labels(), vec!["--------", "Abcdef"]);

    let events = recorded(&lookup);
    lookup.commit(1).unwrap();

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 3);
    match &events[0] {
        LookupEvent::Select { entry, record } => {
            assert_eq!(entry.index, 1);
            assert_eq!(entry.value, "5");
            assert_eq!(record.as_ref(), Some(&ResultRecord::new(5, "Abcdef")));
        }
        other => panic!("expected Select, got {:?}", other),
    }
    assert!(matches!(&events[1], LookupEvent::Change { entry } if entry.index == 1));
    assert_eq!(events[2], LookupEvent::Close);
}

#[test]
fn test_placeholder_commit_yields_absent_record() {
    let lookup = Lookup::new(LookupConfig::new().search(catalog()));
    lookup.open();
    lookup.on_search_input("a");

    let events = recorded(&lookup);
    lookup.commit(0).unwrap();

    let events = events.lock().unwrap();
    match &events[0] {
        LookupEvent::Select { entry, record } => {
            assert!(entry.is_placeholder());
            assert!(record.is_none());
        }
        other => panic!("expected Select, got {:?}", other),
    }
    assert!(matches!(&events[1], LookupEvent::Clear { .. }));
    // The rebuild marked the first hit, so backing out to the placeholder changes
    assert!(matches!(&events[2], LookupEvent::Change { entry } if entry.index == 0));
    assert!(lookup.selected_record().is_none());
    assert_eq!(lookup.selected_index(), Some(0));
}

#[test]
fn test_change_fires_only_when_index_differs() {
    let lookup = Lookup::new(LookupConfig::new().search(catalog()));
    let events = recorded(&lookup);

    lookup.open();
    lookup.on_search_input("a");
    lookup.commit(2).unwrap();

    lookup.open();
    lookup.commit(2).unwrap();

    lookup.open();
    lookup.commit(1).unwrap();

    let selects = kinds(&events)
        .into_iter()
        .filter(|k| *k == LookupEventKind::Select)
        .count();
    let changes = kinds(&events)
        .into_iter()
        .filter(|k| *k == LookupEventKind::Change)
        .count();
    assert_eq!(selects, 3);
    assert_eq!(changes, 2);
}

#[test]
fn test_commit_out_of_range_is_an_error() {
    let lookup = Lookup::new(LookupConfig::new().search(catalog()));
    lookup.open();
    lookup.on_search_input("abcd");

    let events = recorded(&lookup);
    let err = lookup.commit(9).unwrap_err();

    assert_eq!(err, LookupError::NoSuchOption { index: 9, len: 2 });
    assert!(events.lock().unwrap().is_empty());
    assert!(lookup.is_open());
    assert_eq!(lookup.selected_index(), None);
}

#[test]
fn test_commit_updates_button_and_closes() {
    let host = ButtonHost::default();
    let lookup = Lookup::with_host(LookupConfig::new().search(catalog()), host.clone());

    assert_eq!(lookup.button_label(), "--------");
    lookup.open();
    assert_eq!(*host.focused.lock().unwrap(), 1);

    lookup.on_search_input("zur");
    lookup.commit(1).unwrap();

    assert_eq!(*host.buttons.lock().unwrap(), vec!["Zurich".to_string()]);
    assert_eq!(*host.closed.lock().unwrap(), 1);
    assert!(!lookup.is_open());
    assert_eq!(lookup.button_label(), "Zurich");
}

#[test]
fn test_selection_survives_a_new_search() {
    let lookup = Lookup::new(LookupConfig::new().search(catalog()));
    lookup.open();
    lookup.on_search_input("zur");
    lookup.commit(1).unwrap();

    lookup.open();
    lookup.on_search_input("alp");

    assert_eq!(lookup.selected_record(), Some(ResultRecord::new(7, "Zurich")));
    assert_eq!(lookup.button_label(), "Zurich");
}

// ============================================================================
// Change detection across searches
// ============================================================================

/// Answers every query synchronously from a fixed table.
fn regions(query: &str, completion: SearchCompletion) {
    let records = match query {
        "north" => vec![ResultRecord::new(1, "Oslo"), ResultRecord::new(2, "Bergen")],
        "south" => vec![ResultRecord::new(3, "Rome"), ResultRecord::new(4, "Bari")],
        _ => Vec::new(),
    };
    completion.complete(query, records);
}

fn changed_labels(events: &Arc<Mutex<Vec<LookupEvent>>>) -> Vec<String> {
    events
        .lock()
        .unwrap()
        .iter()
        .filter_map(|e| match e {
            LookupEvent::Change { entry } => Some(entry.label.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_same_index_in_a_new_list_is_a_change() {
    let lookup = Lookup::new(LookupConfig::new().search(regions));
    let events = recorded(&lookup);

    lookup.open();
    lookup.on_search_input("north");
    lookup.commit(2).unwrap();

    lookup.open();
    lookup.on_search_input("south");
    lookup.commit(2).unwrap();

    assert_eq!(changed_labels(&events), vec!["Bergen", "Bari"]);
    assert_eq!(lookup.selected_record(), Some(ResultRecord::new(4, "Bari")));
}

#[test]
fn test_marked_first_hit_is_the_current_index() {
    let lookup = Lookup::new(LookupConfig::new().search(regions));
    let events = recorded(&lookup);

    lookup.open();
    lookup.on_search_input("north");
    lookup.commit(1).unwrap();

    // The rebuild already marked Oslo, so picking it changes nothing
    assert_eq!(
        kinds(&events),
        vec![
            LookupEventKind::Open,
            LookupEventKind::Select,
            LookupEventKind::Close,
        ]
    );
    assert_eq!(lookup.selected_record(), Some(ResultRecord::new(1, "Oslo")));
}

#[test]
fn test_rebuild_without_auto_select_resets_to_placeholder() {
    let lookup = Lookup::new(
        LookupConfig::new()
            .search(regions)
            .auto_select_first_result(false),
    );
    let events = recorded(&lookup);

    lookup.open();
    lookup.on_search_input("north");
    lookup.commit(0).unwrap();

    lookup.open();
    lookup.on_search_input("south");
    lookup.commit(1).unwrap();

    lookup.open();
    lookup.on_search_input("north");
    lookup.commit(0).unwrap();

    assert_eq!(changed_labels(&events), vec!["Rome"]);
}

// ============================================================================
// Data access
// ============================================================================

#[test]
fn test_get_data_at_uses_result_indexes() {
    let lookup = Lookup::new(LookupConfig::new().search(catalog()));
    assert!(lookup.get_data_at(0).is_none());

    lookup.open();
    lookup.on_search_input("abcd");

    assert_eq!(lookup.get_data_at(0), Some(ResultRecord::new(5, "Abcdef")));
    assert!(lookup.get_data_at(1).is_none());
}

// ============================================================================
// Auto-selection policy
// ============================================================================

#[test]
fn test_auto_select_highlights_first_result() {
    let lookup = Lookup::new(LookupConfig::new().search(catalog()));
    lookup.open();
    lookup.on_search_input("abcd");

    assert!(lookup.options().get(1).unwrap().selected);
    assert_eq!(lookup.cursor(), 1);
    // The mark is not a commit
    assert_eq!(lookup.selected_index(), None);
}

#[test]
fn test_auto_select_can_be_disabled() {
    let lookup = Lookup::new(
        LookupConfig::new()
            .search(catalog())
            .auto_select_first_result(false),
    );
    lookup.open();
    lookup.on_search_input("abcd");

    assert!(lookup.options().get(0).unwrap().selected);
    assert!(!lookup.options().get(1).unwrap().selected);
    assert_eq!(lookup.cursor(), 0);
}

// ============================================================================
// Listeners
// ============================================================================

#[test]
fn test_subscribe_to_kind_and_unsubscribe() {
    let lookup = Lookup::new(LookupConfig::new().search(catalog()));
    let changes = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&changes);
    let id = lookup.subscribe_to(LookupEventKind::Change, move |_| {
        *counter.lock().unwrap() += 1;
    });

    lookup.open();
    lookup.on_search_input("a");
    lookup.commit(2).unwrap();
    assert_eq!(*changes.lock().unwrap(), 1);

    assert!(lookup.unsubscribe(id));
    assert!(!lookup.unsubscribe(id));

    lookup.open();
    lookup.commit(1).unwrap();
    assert_eq!(*changes.lock().unwrap(), 1);
}

#[test]
fn test_listener_can_read_lookup_during_notification() {
    let lookup = Lookup::new(LookupConfig::new().search(catalog()));
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let handle = lookup.clone();
    lookup.subscribe_to(LookupEventKind::Select, move |_| {
        *sink.lock().unwrap() = handle.selected_record();
    });

    lookup.open();
    lookup.on_search_input("zur");
    lookup.commit(1).unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        Some(ResultRecord::new(7, "Zurich"))
    );
}

#[test]
fn test_open_and_close_notify_once() {
    let lookup = Lookup::new(LookupConfig::new());
    let events = recorded(&lookup);

    lookup.open();
    lookup.open();
    lookup.close();
    lookup.close();

    assert_eq!(
        kinds(&events),
        vec![LookupEventKind::Open, LookupEventKind::Close]
    );
}
