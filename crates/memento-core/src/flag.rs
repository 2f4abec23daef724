//! Boolean flags as they appear on the wire.
//!
//! Historical sheets wrote `required` as `true`, `1` or `"true"`; the
//! compact form writes `1`. Readers accept all of them.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Int(i64),
    Text(String),
    Null(()),
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match FlagRepr::deserialize(deserializer)? {
        FlagRepr::Bool(b) => Ok(b),
        FlagRepr::Int(n) => Ok(n != 0),
        FlagRepr::Null(()) => Ok(false),
        FlagRepr::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "oui" => Ok(true),
            "false" | "0" | "no" | "non" | "" => Ok(false),
            other => Err(de::Error::custom(format!("not a boolean flag: {other:?}"))),
        },
    }
}

/// Write a flag as `1`/`0`.
pub fn serialize_int<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u8(u8::from(*value))
}

pub fn is_false(value: &bool) -> bool {
    !*value
}
