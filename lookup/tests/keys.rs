//! Keyboard handling.

use lookup::{
    CatalogSearch, EventResult, Key, KeyCombo, Lookup, LookupConfig, Phase, ResultRecord,
};

fn lookup() -> Lookup {
    Lookup::new(
        LookupConfig::new().search(CatalogSearch::new(vec![
            ResultRecord::new(1, "San Francisco, California, United States"),
            ResultRecord::new(2, "San Diego, California, United States"),
            ResultRecord::new(3, "Santiago, Santiago Metropolitan, Chile"),
        ])),
    )
}

fn type_text(lookup: &Lookup, text: &str) {
    for c in text.chars() {
        let key = if c == ' ' {
            KeyCombo::key(Key::Space)
        } else {
            KeyCombo::char(c)
        };
        assert_eq!(lookup.handle_key(&key), EventResult::Consumed);
    }
}

#[test]
fn test_closed_lookup_opens_on_enter_space_down() {
    for key in [Key::Enter, Key::Space, Key::Down] {
        let lookup = lookup();
        assert_eq!(lookup.handle_key(&KeyCombo::key(key)), EventResult::Consumed);
        assert_eq!(lookup.phase(), Phase::Open);
    }
}

#[test]
fn test_closed_lookup_ignores_typing() {
    let lookup = lookup();
    assert_eq!(lookup.handle_key(&KeyCombo::char('s')), EventResult::Ignored);
    assert_eq!(lookup.search_text(), "");
}

#[test]
fn test_typing_issues_searches() {
    let lookup = lookup();
    lookup.open();
    type_text(&lookup, "san d");

    assert_eq!(lookup.search_text(), "san d");
    assert_eq!(lookup.latest_seq(), 5);
    assert!(
        lookup
            .options()
            .labels()
            .contains(&"San Diego, California, United States")
    );
}

#[test]
fn test_backspace_searches_again() {
    let lookup = lookup();
    lookup.open();
    type_text(&lookup, "sanx");
    assert_eq!(lookup.options().len(), 1);

    lookup.handle_key(&KeyCombo::key(Key::Backspace));
    assert_eq!(lookup.search_text(), "san");
    assert_eq!(lookup.options().len(), 4);
}

#[test]
fn test_backspace_on_empty_field_issues_nothing() {
    let lookup = lookup();
    lookup.open();
    assert_eq!(
        lookup.handle_key(&KeyCombo::key(Key::Backspace)),
        EventResult::Consumed
    );
    assert_eq!(lookup.latest_seq(), 0);
}

#[test]
fn test_enter_commits_highlighted_entry() {
    let lookup = lookup();
    lookup.open();
    type_text(&lookup, "diego");
    assert_eq!(lookup.cursor(), 1);

    lookup.handle_key(&KeyCombo::key(Key::Enter));

    assert_eq!(lookup.selected_record().map(|r| r.id.to_string()), Some("2".into()));
    assert!(!lookup.is_open());
}

#[test]
fn test_navigation_is_clamped() {
    let lookup = lookup();
    lookup.open();
    type_text(&lookup, "san");

    lookup.handle_key(&KeyCombo::key(Key::End));
    assert_eq!(lookup.cursor(), 3);
    lookup.handle_key(&KeyCombo::key(Key::Down));
    assert_eq!(lookup.cursor(), 3);
    lookup.handle_key(&KeyCombo::key(Key::Home));
    assert_eq!(lookup.cursor(), 0);
    lookup.handle_key(&KeyCombo::key(Key::Up));
    assert_eq!(lookup.cursor(), 0);
}

#[test]
fn test_escape_closes_without_commit() {
    let lookup = lookup();
    lookup.open();
    type_text(&lookup, "san");
    lookup.handle_key(&KeyCombo::key(Key::Escape));

    assert!(!lookup.is_open());
    assert_eq!(lookup.selected_index(), None);
}

#[test]
fn test_modified_keys_are_ignored() {
    let lookup = lookup();
    lookup.open();
    assert_eq!(
        lookup.handle_key(&KeyCombo::char('a').ctrl()),
        EventResult::Ignored
    );
    assert_eq!(
        lookup.handle_key(&KeyCombo::char('a').alt()),
        EventResult::Ignored
    );
    assert_eq!(lookup.search_text(), "");
}
