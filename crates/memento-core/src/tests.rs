use crate::*;
use crate::placeholder::{is_valid_id, placeholder_ids};

fn sample() -> Record {
    Record::new("Fuite de gaz", "Site {{site}}, produit {{ code_onu }}.")
        .with_field(Field::new("site").with_label("Site").required())
        .with_field(Field::new("code_onu").with_label("Code ONU"))
}

// ========== Record ==========

#[test]
fn test_record_serializes_camel_case_and_skips_absent() {
    let mut r = sample();
    r.last_updated = Some("2025-11-02".into());
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["lastUpdated"], "2025-11-02");
    assert!(json.get("category").is_none());
    assert!(json.get("confidence").is_none());
    assert!(json["fields"][1].get("required").is_none());
    assert!(json["fields"][1].get("kind").is_none());
}

#[test]
fn test_record_reads_variables_alias() {
    let r: Record = serde_json::from_str(
        r#"{"title":"T","prompt":"P","variables":[{"id":"a","required":"true","type":"number"}]}"#,
    )
    .unwrap();
    assert_eq!(r.fields.len(), 1);
    assert!(r.fields[0].required);
    assert_eq!(r.fields[0].kind, FieldKind::Number);
}

#[test]
fn test_unknown_kind_reads_as_text() {
    let f: Field = serde_json::from_str(r#"{"id":"d","kind":"date"}"#).unwrap();
    assert_eq!(f.kind, FieldKind::Text);
}

#[test]
fn test_required_flag_forms() {
    for (raw, expected) in [("1", true), ("0", false), ("true", true), ("\"oui\"", true), ("null", false)] {
        let f: Field = serde_json::from_str(&format!(r#"{{"id":"x","required":{raw}}}"#)).unwrap();
        assert_eq!(f.required, expected, "input {raw}");
    }
    assert!(serde_json::from_str::<Field>(r#"{"id":"x","required":"maybe"}"#).is_err());
}

#[test]
fn test_display_label_falls_back_to_id() {
    assert_eq!(Field::new("site").display_label(), "site");
    assert_eq!(Field::new("site").with_label("  ").display_label(), "site");
    assert_eq!(Field::new("site").with_label("Site").display_label(), "Site");
}

#[test]
fn test_normalized_drops_empty_values() {
    let mut r = sample();
    r.category = Some(String::new());
    r.version = Some("1.2".into());
    r.confidence = Some(Confidence::default());
    r.fields[0].hint = Some(String::new());
    let n = r.normalized();
    assert_eq!(n.category, None);
    assert_eq!(n.version.as_deref(), Some("1.2"));
    assert_eq!(n.confidence, None);
    assert_eq!(n.fields[0].hint, None);
}

// ========== Validation ==========

#[test]
fn test_validate_ok() {
    assert!(sample().validate(10).is_ok());
}

#[test]
fn test_validate_empty_title_and_prompt() {
    assert!(Record::new("  ", "p").validate(10).is_err());
    assert!(Record::new("t", "").validate(10).is_err());
}

#[test]
fn test_validate_field_limits() {
    let mut r = Record::new("t", "p");
    for i in 0..11 {
        r.fields.push(Field::new(format!("f{i}")));
    }
    let err = r.validate(10).unwrap_err();
    assert!(err.to_string().contains("at most 10"));
}

#[test]
fn test_validate_duplicate_and_missing_ids() {
    let dup = Record::new("t", "p").with_field(Field::new("a")).with_field(Field::new("a"));
    assert!(matches!(dup.validate(10), Err(CoreError::InvalidRecord(_))));
    let blank = Record::new("t", "p").with_field(Field::new(""));
    assert!(blank.validate(10).is_err());
}

#[test]
fn test_validate_confidence_range() {
    let mut r = sample();
    r.confidence = Some(Confidence { chatgpt: Some(3), perplexity: Some(4), mistral: None });
    let err = r.validate(10).unwrap_err();
    assert!(err.to_string().contains("perplexity"));
    r.confidence = Some(Confidence { chatgpt: None, perplexity: None, mistral: Some(-1) });
    assert!(r.validate(10).unwrap_err().to_string().contains("mistral"));
}

#[test]
fn test_sanitized_confidence() {
    let c = Confidence { chatgpt: Some(9), perplexity: Some(2), mistral: None }.sanitized();
    assert_eq!(c, Confidence { chatgpt: None, perplexity: Some(2), mistral: None });
    let c = Confidence { chatgpt: Some(300), perplexity: Some(-1), mistral: Some(0) }.sanitized();
    assert_eq!(c, Confidence { chatgpt: None, perplexity: None, mistral: Some(0) });
}

#[test]
fn test_confidence_reads_wide_scores() {
    let c: Confidence = serde_json::from_str(r#"{"chatgpt": 300, "mistral": -1}"#).unwrap();
    assert_eq!(c.chatgpt, Some(300));
    assert!(c.sanitized().is_empty());
}

// ========== Placeholders ==========

#[test]
fn test_placeholder_ids_order_and_dedup() {
    let ids = placeholder_ids("{{b}} {{ a }} {{b}} {{c.d-e_f}} {{ not valid }}");
    assert_eq!(ids, vec!["b", "a", "c.d-e_f"]);
}

#[test]
fn test_undeclared_placeholders() {
    let r = Record::new("t", "{{site}} {{ghost}}").with_field(Field::new("site"));
    assert_eq!(r.undeclared_placeholders(), vec!["ghost"]);
}

#[test]
fn test_valid_id() {
    assert!(is_valid_id("code_onu"));
    assert!(!is_valid_id("Code ONU"));
    assert!(!is_valid_id(""));
}

// ========== Config ==========

#[test]
fn test_config_defaults() {
    let c = MementoConfig::default();
    assert!(c.codec.compress);
    assert_eq!(c.codec.max_fields, 10);
    assert_eq!(c.sizing.steps.len(), 4);
    assert_eq!(c.render.residue_marker, "(not provided)");
}

#[test]
fn test_config_partial_json() {
    let c = MementoConfig::from_json_str(r#"{"codec":{"compress":false},"render":{"residue_marker":"N/A"}}"#).unwrap();
    assert!(!c.codec.compress);
    assert_eq!(c.codec.max_fields, 10);
    assert_eq!(c.render.residue_marker, "N/A");
    assert_eq!(c.sizing.max_module_pixels, 512);
}

#[test]
fn test_config_rejects_bad_headroom() {
    let err = MementoConfig::from_json_str(r#"{"sizing":{"headroom_pct":0}}"#).unwrap_err();
    assert!(matches!(err, CoreError::Config(_)));
}
