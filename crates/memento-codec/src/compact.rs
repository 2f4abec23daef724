//! Short-key projection of a [`Record`] used only on the wire.
//!
//! Empty values are omitted rather than written as `null`; that is what
//! keeps the QR payload small. Unknown keys are ignored on the way in.
//! Per-field hints and select options are not carried.

use memento_core::{flag, Confidence, Field, FieldKind, Record};
use serde::{Deserialize, Serialize};

use crate::alias::AliasGroups;

/// Record keys. `t` is also what identifies the compact shape.
pub const TITLE_KEY: &str = "t";

pub const FIELD_ARRAY_KEYS: &[&str] = &["f", "vars"];
pub const RECORD_ALIASES: AliasGroups = &[&["f", "vars"]];
pub const FIELD_ALIASES: AliasGroups = &[&["l", "n"], &["r", "ob"]];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactRecord {
    #[serde(rename = "t", default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "o", default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(rename = "r", default, skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
    #[serde(rename = "a", default, skip_serializing_if = "Option::is_none")]
    pub designer: Option<String>,
    #[serde(rename = "u", default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(rename = "v", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "p", default, skip_serializing_if = "String::is_empty")]
    pub prompt: String,
    #[serde(rename = "f", alias = "vars", default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<CompactField>,
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<CompactConfidence>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactField {
    #[serde(rename = "i", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "l", alias = "n", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "k", default, skip_serializing_if = "FieldKind::is_default")]
    pub kind: FieldKind,
    #[serde(
        rename = "r",
        alias = "ob",
        default,
        deserialize_with = "flag::deserialize",
        serialize_with = "flag::serialize_int",
        skip_serializing_if = "flag::is_false"
    )]
    pub required: bool,
    /// First-generation compact sheets carried the hint as `ph`.
    #[serde(rename = "ph", default, skip_serializing)]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactConfidence {
    #[serde(rename = "g", default, skip_serializing_if = "Option::is_none")]
    pub chatgpt: Option<i64>,
    #[serde(rename = "p", default, skip_serializing_if = "Option::is_none")]
    pub perplexity: Option<i64>,
    #[serde(rename = "m", default, skip_serializing_if = "Option::is_none")]
    pub mistral: Option<i64>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

/// Long form → compact form.
pub fn compact(record: &Record) -> CompactRecord {
    CompactRecord {
        title: record.title.clone(),
        category: non_empty(&record.category),
        objective: non_empty(&record.objective),
        references: non_empty(&record.references),
        designer: non_empty(&record.designer),
        last_updated: non_empty(&record.last_updated),
        version: non_empty(&record.version),
        prompt: record.prompt.clone(),
        fields: record
            .fields
            .iter()
            .map(|f| CompactField {
                id: f.id.clone(),
                label: non_empty(&f.label),
                kind: f.kind,
                required: f.required,
                hint: None,
            })
            .collect(),
        confidence: record
            .confidence
            .filter(|c| !c.is_empty())
            .map(|c| CompactConfidence { chatgpt: c.chatgpt, perplexity: c.perplexity, mistral: c.mistral }),
    }
}

/// Compact form → long form, omitted keys taking their defaults.
pub fn expand(compact: &CompactRecord) -> Record {
    Record {
        title: compact.title.clone(),
        category: non_empty(&compact.category),
        objective: non_empty(&compact.objective),
        references: non_empty(&compact.references),
        designer: non_empty(&compact.designer),
        last_updated: non_empty(&compact.last_updated),
        version: non_empty(&compact.version),
        prompt: compact.prompt.clone(),
        fields: compact
            .fields
            .iter()
            .map(|f| Field {
                id: f.id.clone(),
                label: non_empty(&f.label),
                kind: f.kind,
                required: f.required,
                hint: non_empty(&f.hint),
                options: Vec::new(),
            })
            .collect(),
        confidence: compact
            .confidence
            .map(|c| Confidence { chatgpt: c.chatgpt, perplexity: c.perplexity, mistral: c.mistral })
            .filter(|c| !c.is_empty()),
    }
}

/// Canonical single-line JSON text of a compact record.
pub fn to_json(compact: &CompactRecord) -> serde_json::Result<String> {
    serde_json::to_string(compact)
}
