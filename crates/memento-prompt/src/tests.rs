use crate::*;
use memento_core::{Field, FieldKind, MementoConfig, Record, RenderConfig};

fn hello(required: bool) -> Record {
    let field = Field::new("name");
    let field = if required { field.required() } else { field };
    Record::new("Greeting", "Hello {{name}}!").with_field(field)
}

// ========== Substitution ==========

#[test]
fn test_render_final_with_value() {
    let input = PromptInput::new().with_value("name", "Alice");
    assert_eq!(render(&hello(false), &input), "Hello Alice!");
}

#[test]
fn test_render_final_residue() {
    assert_eq!(render(&hello(false), &PromptInput::new()), "Hello (not provided)!");
}

#[test]
fn test_preview_signals_missing_required() {
    let out = Renderer::default().preview(&hello(true), &PromptInput::new());
    assert_eq!(out.text, "Hello {{name}}!");
    assert!(!out.is_complete());
    assert_eq!(out.missing_required, vec!["name"]);
    assert_eq!(out.unresolved, vec!["name"]);
}

#[test]
fn test_preview_optional_missing_is_complete() {
    let out = Renderer::default().preview(&hello(false), &PromptInput::new());
    assert!(out.is_complete());
    assert_eq!(out.text, "Hello !");
    assert_eq!(out.unresolved, vec!["name"]);
}

#[test]
fn test_preview_blanks_only_optional_fields() {
    let r = Record::new("t", "{{site}}|{{note}}|{{ghost}}")
        .with_field(Field::new("site").required())
        .with_field(Field::new("note"));
    let out = Renderer::default().preview(&r, &PromptInput::new());
    assert_eq!(out.text, "{{site}}||{{ghost}}");
    assert_eq!(out.missing_required, vec!["site"]);
    assert_eq!(out.unresolved, vec!["site", "note", "ghost"]);
}

#[test]
fn test_whitespace_tolerant_and_repeated() {
    let r = Record::new("t", "{{ name }} / {{name}} / {{  name}}").with_field(Field::new("name"));
    let input = PromptInput::new().with_value("name", "Bob");
    assert_eq!(render(&r, &input), "Bob / Bob / Bob");
}

#[test]
fn test_blank_value_counts_as_missing() {
    let input = PromptInput::new().with_value("name", "   ");
    let out = Renderer::default().compile(&hello(true), &input);
    assert_eq!(out.text, "Hello (not provided)!");
    assert!(!out.is_complete());
}

#[test]
fn test_undeclared_placeholder_not_substituted() {
    // Values only apply to declared fields.
    let r = Record::new("t", "{{name}} {{ghost}}").with_field(Field::new("name"));
    let input = PromptInput::new().with_value("name", "A").with_value("ghost", "B");
    let out = Renderer::default().compile(&r, &input);
    assert_eq!(out.text, "A (not provided)");
    assert_eq!(out.unresolved, vec!["ghost"]);
}

#[test]
fn test_values_are_not_rescanned() {
    let r = Record::new("t", "{{a}} {{b}}").with_field(Field::new("a")).with_field(Field::new("b"));
    let input = PromptInput::new().with_value("a", "{{b}}").with_value("b", "x");
    assert_eq!(render(&r, &input), "{{b}} x");
}

#[test]
fn test_geoloc_value() {
    let r = Record::new("t", "Position : {{pos}}").with_field(Field::new("pos").with_kind(FieldKind::Geoloc));
    let mut input = PromptInput::new();
    input.set_geo("pos", 48.8566, 2.3522);
    assert_eq!(render(&r, &input), "Position : Latitude 48.8566, Longitude 2.3522");
}

#[test]
fn test_parse_geo() {
    assert_eq!(FieldValue::parse_geo("45.5, -0.25"), FieldValue::Geo { latitude: 45.5, longitude: -0.25 });
    assert_eq!(FieldValue::parse_geo("près du pont"), FieldValue::Text("près du pont".into()));
    assert_eq!(FieldValue::parse_geo("45.5,"), FieldValue::Text("45.5,".into()));
}

// ========== Addendum ==========

#[test]
fn test_addendum_appended() {
    let input = PromptInput::new().with_value("name", "Alice").with_addendum("  Vent fort  ");
    let text = render(&hello(false), &input);
    assert_eq!(
        text,
        "Hello Alice!\n\nAdditional information provided by the operator:\nVent fort"
    );
}

#[test]
fn test_addendum_never_substituted() {
    let input = PromptInput::new().with_addendum("{{name}}");
    let out = Renderer::default().compile(&hello(false), &input);
    assert!(out.text.starts_with("Hello (not provided)!"));
    assert!(out.text.ends_with("\n{{name}}"));
}

#[test]
fn test_blank_addendum_ignored() {
    let input = PromptInput::new().with_addendum(" \n ");
    assert_eq!(render(&hello(false), &input), "Hello (not provided)!");
}

#[test]
fn test_custom_config() {
    let renderer = Renderer::new(RenderConfig {
        residue_marker: "(non renseigné)".into(),
        addendum_label: "Informations complémentaires :".into(),
    });
    let out = renderer.compile(&hello(false), &PromptInput::new().with_addendum("RAS"));
    assert_eq!(out.text, "Hello (non renseigné)!\n\nInformations complémentaires :\nRAS");
}

#[test]
fn test_render_leaves_record_untouched() {
    let r = hello(true);
    let before = r.clone();
    let _ = Renderer::default().compile(&r, &PromptInput::new().with_value("name", "Z"));
    assert_eq!(r, before);
}

// ========== Session ==========

#[test]
fn test_session_lifecycle() {
    let mut s = Session::new(&MementoConfig::default());
    assert_eq!(s.state(), SessionState::Empty);
    assert!(s.preview().is_none());

    s.load(hello(true));
    assert_eq!(s.state(), SessionState::Editing);
    assert!(!s.is_ready());

    s.set_value("name", "Alice");
    assert_eq!(s.state(), SessionState::Ready);
    assert!(s.is_ready());
    assert_eq!(s.compile().unwrap().text, "Hello Alice!");

    s.reset();
    assert_eq!(s.state(), SessionState::Empty);
    assert!(s.input().values.is_empty());
}

#[test]
fn test_session_load_clears_values() {
    let mut s = Session::default();
    s.load(hello(false));
    s.set_value("name", "Alice");
    s.set_addendum("note");
    s.load(hello(false));
    assert!(s.input().values.is_empty());
    assert_eq!(s.input().addendum, None);
}

#[test]
fn test_session_geo_and_display() {
    let r = Record::new("Point", "{{pos}}").with_field(Field::new("pos").with_kind(FieldKind::Geoloc).required());
    let mut s = Session::default();
    s.load(r);
    s.set_geo("pos", 1.5, 2.0);
    assert_eq!(s.compile().unwrap().text, "Latitude 1.5, Longitude 2");
    assert!(s.to_string().contains("sheet=Point"));
}
