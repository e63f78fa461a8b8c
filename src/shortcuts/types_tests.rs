use super::types::*;

#[test]
fn equality_is_reflexive_and_symmetric() {
    let samples = [
        Binding::ctrl("k"),
        Binding::key("Escape"),
        Binding::alt("ArrowUp"),
        Binding::shift("?"),
        Binding {
            meta: true,
            ..Binding::shift("x")
        },
    ];
    for a in &samples {
        assert!(bindings_equal(a, a));
        for b in &samples {
            assert_eq!(bindings_equal(a, b), bindings_equal(b, a));
        }
    }
}

#[test]
fn modifier_mismatch_is_not_equal() {
    assert!(!bindings_equal(&Binding::ctrl("k"), &Binding::key("k")));
    assert!(!bindings_equal(&Binding::ctrl("k"), &Binding::alt("k")));
    assert!(!bindings_equal(&Binding::key("a"), &Binding::shift("a")));
}

#[test]
fn shifted_punctuation_ignores_shift_flag() {
    assert!(bindings_equal(&Binding::shift("?"), &Binding::key("?")));
    assert!(bindings_equal(&Binding::key("~"), &Binding::shift("~")));
    // Other modifiers still count
    assert!(!bindings_equal(&Binding::shift("?"), &Binding::ctrl("?")));
}

#[test]
fn unshifted_punctuation_still_compares_shift() {
    assert!(!bindings_equal(&Binding::key("/"), &Binding::shift("/")));
    assert!(!is_shifted_punctuation("/"));
    assert!(is_shifted_punctuation("?"));
    assert!(!is_shifted_punctuation("??"));
}

#[test]
fn alternate_key_does_not_affect_equality() {
    let stored = Binding::ctrl("Enter").with_alternate_key("NumpadEnter");
    assert!(bindings_equal(&stored, &Binding::ctrl("Enter")));
    assert!(stored.matches_event(&Binding::ctrl("NumpadEnter")));
    assert!(!stored.matches_event(&Binding::key("NumpadEnter")));
}

#[test]
fn normalize_lowercases_single_chars_with_modifier() {
    let b = normalize_event_to_binding("K", true, false, false, false);
    assert_eq!(b, Binding::ctrl("k"));
}

#[test]
fn normalize_keeps_case_without_modifier() {
    let b = normalize_event_to_binding("K", false, false, false, false);
    assert_eq!(b.key, "K");
}

#[test]
fn normalize_passes_named_keys_through() {
    let b = normalize_event_to_binding("ArrowUp", false, true, false, false);
    assert_eq!(b, Binding::alt("ArrowUp"));
    let esc = normalize_event_to_binding("Escape", true, false, false, false);
    assert_eq!(esc.key, "Escape");
}

#[test]
fn display_label_orders_modifiers() {
    let b = Binding {
        key: "x".to_string(),
        ctrl: true,
        alt: true,
        shift: true,
        meta: true,
        alternate_key: None,
    };
    assert_eq!(display_label(&b), "Ctrl+Alt+Shift+Meta+x");
}

#[test]
fn display_label_special_keys() {
    assert_eq!(display_label(&Binding::key(" ")), "Space");
    assert_eq!(display_label(&Binding::key("Escape")), "Esc");
    assert_eq!(display_label(&Binding::alt("ArrowUp")), "Alt+Up");
    assert_eq!(display_label(&Binding::key("ArrowLeft")), "Left");
    assert_eq!(display_label(&Binding::ctrl("Enter")), "Ctrl+Enter");
    assert_eq!(Binding::shift("?").to_string(), "Shift+?");
}

#[test]
fn parse_modifiers_and_key() {
    assert_eq!(Binding::parse("Ctrl+k").unwrap(), Binding::ctrl("k"));
    assert_eq!(Binding::parse("alt ArrowDown").unwrap(), Binding::alt("ArrowDown"));
    assert_eq!(Binding::parse("Shift+?").unwrap(), Binding::shift("?"));
    let meta = Binding::parse("cmd+shift+p").unwrap();
    assert!(meta.meta && meta.shift && !meta.ctrl);
    assert_eq!(meta.key, "p");
}

#[test]
fn parse_plus_key() {
    assert_eq!(Binding::parse("+").unwrap(), Binding::key("+"));
    assert_eq!(Binding::parse("Shift++").unwrap(), Binding::shift("+"));
}

#[test]
fn parse_errors() {
    assert_eq!(Binding::parse("   "), Err(ShortcutParseError::Empty));
    assert_eq!(Binding::parse("ctrl+shift"), Err(ShortcutParseError::MissingKey));
    assert_eq!(
        Binding::parse("ctrl+a+b"),
        Err(ShortcutParseError::UnknownToken("b".to_string()))
    );
}

#[test]
fn canonical_key_ignores_case_and_orders_modifiers() {
    let a = Binding::parse("Shift+Ctrl+K").unwrap();
    assert_eq!(a.canonical_key(), "ctrl+shift+k");
    assert_eq!(Binding::key("Escape").canonical_key(), "escape");
}

#[test]
fn binding_json_uses_camel_case() {
    let b = Binding::ctrl("Enter").with_alternate_key("NumpadEnter");
    let json = serde_json::to_string(&b).unwrap();
    assert!(json.contains("\"alternateKey\":\"NumpadEnter\""));
    let parsed: Binding = serde_json::from_str(r#"{"key":"k","ctrl":true}"#).unwrap();
    assert_eq!(parsed, Binding::ctrl("k"));
}
