//! Key alias resolution ahead of serde.
//!
//! serde reports a key and its `alias` appearing together as a duplicate
//! field. Sheets in the wild do carry both (`fields` next to `variables`,
//! `title` next to `titre`), so each shape lists its alias groups, most
//! preferred key first, and the losers are removed before deserializing.
//! A key holding a value wins over a preferred key left blank.

use serde_json::{Map, Value};

/// Ordered alias groups of one object level.
pub type AliasGroups = &'static [&'static [&'static str]];

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Keep one key of every group and drop the others.
pub fn collapse(obj: &mut Map<String, Value>, groups: AliasGroups) {
    for group in groups {
        let winner = group
            .iter()
            .find(|k| obj.get(**k).is_some_and(|v| !is_blank(v)))
            .or_else(|| group.iter().find(|k| obj.contains_key(**k)))
            .copied();
        let Some(winner) = winner else { continue };
        for key in group.iter().filter(|k| **k != winner) {
            if obj.remove(*key).is_some() {
                tracing::debug!(key = *key, kept = winner, "dropping shadowed alias key");
            }
        }
    }
}

/// [`collapse`] on a record object, then on every object inside the field
/// array that survived.
pub fn collapse_record(obj: &mut Map<String, Value>, record: AliasGroups, field: AliasGroups, field_arrays: &[&str]) {
    collapse(obj, record);
    for key in field_arrays {
        if let Some(Value::Array(items)) = obj.get_mut(*key) {
            for item in items.iter_mut().filter_map(Value::as_object_mut) {
                collapse(item, field);
            }
        }
    }
}
