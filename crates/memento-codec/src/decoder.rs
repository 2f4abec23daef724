//! Multi-generation decoder.
//!
//! A scanned string is JSON in one of several historical shapes,
//! possibly wrapped in an [`Envelope`]. [`classify`] turns a JSON value
//! into exactly one [`SheetShape`]; each shape owns its normalizer into
//! the current [`Record`].

use memento_core::Record;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::alias::{self, AliasGroups};
use crate::compact::{self, expand, CompactRecord, TITLE_KEY};
use crate::envelope::{CompressionBackend, Envelope, COMPACT_SCHEMA_VERSION};
use crate::error::DecodeError;
use crate::legacy::{self, derive_id, LegacyRecord, LEGACY_FIELD_KEYS, TITLE_KEYS};

/// Keys that, next to `title`, mark a current long-form record.
const CURRENT_BODY_KEYS: &[&str] = &["objective", "prompt", "fields", "variables"];

/// Field array keys in either long form.
const FIELD_ARRAY_KEYS: &[&str] = &["fields", "variables"];

const CURRENT_RECORD_ALIASES: AliasGroups = &[&["fields", "variables"]];
const CURRENT_FIELD_ALIASES: AliasGroups = &[&["kind", "type"]];

/// The payload shapes a reader may meet in the wild.
#[derive(Debug, Clone)]
pub enum SheetShape {
    Compact(CompactRecord),
    Legacy(LegacyRecord),
    Current(Record),
}

impl SheetShape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Compact(_) => "compact",
            Self::Legacy(_) => "legacy",
            Self::Current(_) => "current",
        }
    }

    pub fn normalize(self) -> Record {
        match self {
            Self::Compact(compact) => expand(&compact),
            Self::Legacy(legacy) => legacy.normalize(),
            Self::Current(record) => record.normalized(),
        }
    }
}

fn has_any(obj: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter().any(|k| obj.contains_key(*k))
}

fn uses_legacy_field_keys(obj: &Map<String, Value>) -> bool {
    FIELD_ARRAY_KEYS
        .iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_array))
        .flatten()
        .filter_map(Value::as_object)
        .any(|field| has_any(field, LEGACY_FIELD_KEYS))
}

fn parse_shape<T: for<'de> Deserialize<'de>>(obj: Map<String, Value>, shape: &str) -> Result<T, DecodeError> {
    serde_json::from_value(Value::Object(obj))
        .map_err(|e| DecodeError::UnknownSchema(format!("{shape} signature but unexpected layout: {e}")))
}

fn parse_compact(mut obj: Map<String, Value>) -> Result<CompactRecord, DecodeError> {
    alias::collapse_record(&mut obj, compact::RECORD_ALIASES, compact::FIELD_ALIASES, compact::FIELD_ARRAY_KEYS);
    parse_shape(obj, "compact")
}

fn not_an_object() -> DecodeError {
    DecodeError::UnknownSchema("payload is not a JSON object".into())
}

/// Pick the shape of `value` by structural signature.
///
/// Precedence: compact, then legacy, then current.
pub fn classify(value: Value) -> Result<SheetShape, DecodeError> {
    let Value::Object(mut obj) = value else {
        return Err(not_an_object());
    };

    if obj.contains_key(TITLE_KEY) && !has_any(&obj, TITLE_KEYS) {
        return Ok(SheetShape::Compact(parse_compact(obj)?));
    }
    if obj.contains_key("titre") || (obj.contains_key("title") && uses_legacy_field_keys(&obj)) {
        alias::collapse_record(&mut obj, legacy::RECORD_ALIASES, legacy::FIELD_ALIASES, FIELD_ARRAY_KEYS);
        return Ok(SheetShape::Legacy(parse_shape(obj, "legacy")?));
    }
    if obj.contains_key("title") && has_any(&obj, CURRENT_BODY_KEYS) {
        alias::collapse_record(&mut obj, CURRENT_RECORD_ALIASES, CURRENT_FIELD_ALIASES, FIELD_ARRAY_KEYS);
        return Ok(SheetShape::Current(parse_shape(obj, "current")?));
    }

    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.truncate(8);
    Err(DecodeError::UnknownSchema(format!("no known sheet signature (keys: {})", keys.join(", "))))
}

/// Settings for [`decode_with`].
pub struct DecodeOptions<'a> {
    pub backend: &'a dyn CompressionBackend,
    pub max_inflated_bytes: usize,
}

fn open_envelope(envelope: &Envelope, opts: &DecodeOptions<'_>) -> Result<Value, DecodeError> {
    let inner = envelope
        .unpack(opts.backend, opts.max_inflated_bytes)
        .map_err(|e| DecodeError::CorruptEnvelope(e.to_string()))?;
    tracing::debug!(wire_len = envelope.data.len(), inflated_len = inner.len(), "opened envelope");
    serde_json::from_str(&inner)
        .map_err(|e| DecodeError::CorruptEnvelope(format!("inner payload is not JSON: {e}")))
}

/// Decode a scanned payload into a complete [`Record`].
pub fn decode_with(raw: &str, opts: &DecodeOptions<'_>) -> Result<Record, DecodeError> {
    let parsed: Value =
        serde_json::from_str(raw.trim()).map_err(|e| DecodeError::MalformedJson(e.to_string()))?;

    let shape = match Envelope::detect(&parsed) {
        Some(envelope) => {
            let inner = open_envelope(&envelope, opts)?;
            match envelope.schema {
                None => classify(inner)?,
                Some(COMPACT_SCHEMA_VERSION) => match inner {
                    Value::Object(obj) => SheetShape::Compact(parse_compact(obj)?),
                    _ => return Err(not_an_object()),
                },
                Some(other) => {
                    return Err(DecodeError::UnknownSchema(format!(
                        "envelope schema {other} is newer than supported ({COMPACT_SCHEMA_VERSION})"
                    )))
                }
            }
        }
        None => classify(parsed)?,
    };
    tracing::debug!(shape = shape.name(), "classified payload");

    let mut record = shape.normalize();
    if record.title.trim().is_empty() {
        return Err(DecodeError::IncompleteRecord("title is missing".into()));
    }
    if record.prompt.trim().is_empty() {
        return Err(DecodeError::IncompleteRecord("prompt is missing".into()));
    }
    record.confidence = record.confidence.map(|c| c.sanitized()).filter(|c| !c.is_empty());
    fill_missing_ids(&mut record);
    Ok(record)
}

/// Fields that reached us without an id get one from their label, or
/// `var_<n>` by position.
fn fill_missing_ids(record: &mut Record) {
    for (index, field) in record.fields.iter_mut().enumerate() {
        if field.id.trim().is_empty() {
            field.id = field
                .label
                .as_deref()
                .and_then(derive_id)
                .unwrap_or_else(|| format!("var_{}", index + 1));
            tracing::warn!(id = %field.id, "field without id, assigned positional id");
        }
    }
}
