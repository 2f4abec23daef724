//! Long-form sheet model.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

use crate::error::{CoreError, Result};
use crate::flag;
use crate::placeholder::{is_valid_id, placeholder_ids};

pub const MAX_CONFIDENCE: i64 = 3;

/// Input widget of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FieldKind {
    #[default]
    Text,
    Textarea,
    Number,
    Select,
    Geoloc,
    File,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Select => "select",
            Self::Geoloc => "geoloc",
            Self::File => "file",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Some(Self::Text),
            "textarea" => Some(Self::Textarea),
            "number" => Some(Self::Number),
            "select" => Some(Self::Select),
            "geoloc" | "geolocation" => Some(Self::Geoloc),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    /// Unknown kinds read as `text`.
    pub fn parse_lenient(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            tracing::warn!(kind = s, "unknown field kind, reading as text");
            Self::Text
        })
    }

    pub fn is_default(&self) -> bool {
        *self == Self::Text
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| Self::parse_lenient(&s)).unwrap_or_default())
    }
}

/// One input the consumer supplies before rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, alias = "type", skip_serializing_if = "FieldKind::is_default")]
    pub kind: FieldKind,
    #[serde(default, deserialize_with = "flag::deserialize", skip_serializing_if = "flag::is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Field {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Default::default() }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Display name, falling back to the id.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.trim().is_empty() => label,
            _ => &self.id,
        }
    }
}

/// Per-assistant confidence scores, each within `0..=MAX_CONFIDENCE`.
///
/// Stored wide so that a stray `300` or `-1` on the wire is still read
/// and can be dropped instead of failing the whole sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confidence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chatgpt: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perplexity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mistral: Option<i64>,
}

impl Confidence {
    pub fn is_empty(&self) -> bool {
        self.chatgpt.is_none() && self.perplexity.is_none() && self.mistral.is_none()
    }

    fn entries(&self) -> [(&'static str, Option<i64>); 3] {
        [("chatgpt", self.chatgpt), ("perplexity", self.perplexity), ("mistral", self.mistral)]
    }

    /// Drop scores outside the allowed range.
    pub fn sanitized(self) -> Self {
        let keep = |engine: &str, score: Option<i64>| match score {
            Some(s) if !in_range(s) => {
                tracing::warn!(engine, score = s, "confidence score out of range, dropping");
                None
            }
            other => other,
        };
        Self {
            chatgpt: keep("chatgpt", self.chatgpt),
            perplexity: keep("perplexity", self.perplexity),
            mistral: keep("mistral", self.mistral),
        }
    }
}

fn in_range(score: i64) -> bool {
    (0..=MAX_CONFIDENCE).contains(&score)
}

/// The canonical long-form sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub prompt: String,
    #[serde(default, alias = "variables")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

impl Record {
    pub fn new(title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self { title: title.into(), prompt: prompt.into(), ..Default::default() }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Title and prompt are present.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.prompt.trim().is_empty()
    }

    /// Placeholders in the prompt with no declared field.
    pub fn undeclared_placeholders(&self) -> Vec<String> {
        placeholder_ids(&self.prompt)
            .into_iter()
            .filter(|id| self.field(id).is_none())
            .collect()
    }

    /// Blank optional strings become absent, an all-empty confidence
    /// block becomes absent. This is the shape a record has after a
    /// trip through the wire.
    pub fn normalized(&self) -> Self {
        let mut out = self.clone();
        for slot in [
            &mut out.category,
            &mut out.objective,
            &mut out.references,
            &mut out.designer,
            &mut out.last_updated,
            &mut out.version,
        ] {
            if slot.as_deref().is_some_and(str::is_empty) {
                *slot = None;
            }
        }
        for field in &mut out.fields {
            if field.label.as_deref().is_some_and(str::is_empty) {
                field.label = None;
            }
            if field.hint.as_deref().is_some_and(str::is_empty) {
                field.hint = None;
            }
        }
        if out.confidence.is_some_and(|c| c.is_empty()) {
            out.confidence = None;
        }
        out
    }

    /// Producer-side checks. Readers are more lenient than this.
    pub fn validate(&self, max_fields: usize) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::InvalidRecord("title must not be empty".into()));
        }
        if self.prompt.trim().is_empty() {
            return Err(CoreError::InvalidRecord("prompt must not be empty".into()));
        }
        if self.fields.len() > max_fields {
            return Err(CoreError::InvalidRecord(format!(
                "{} fields declared, at most {max_fields} allowed",
                self.fields.len()
            )));
        }

        let mut seen = HashSet::new();
        for (index, field) in self.fields.iter().enumerate() {
            if field.id.trim().is_empty() {
                return Err(CoreError::InvalidRecord(format!("field #{} has no id", index + 1)));
            }
            if !seen.insert(field.id.as_str()) {
                return Err(CoreError::InvalidRecord(format!("duplicate field id {:?}", field.id)));
            }
            if !is_valid_id(&field.id) {
                tracing::warn!(id = %field.id, "field id cannot be referenced as a placeholder");
            }
            if !field.options.is_empty() && field.kind != FieldKind::Select {
                tracing::warn!(id = %field.id, kind = %field.kind, "options are ignored for non-select fields");
            }
        }

        if let Some(confidence) = &self.confidence {
            for (engine, score) in confidence.entries() {
                if let Some(score) = score.filter(|s| !in_range(*s)) {
                    return Err(CoreError::InvalidRecord(format!(
                        "confidence for {engine} is {score}, expected 0..={MAX_CONFIDENCE}"
                    )));
                }
            }
        }

        for id in self.undeclared_placeholders() {
            tracing::warn!(placeholder = %id, "prompt references an undeclared field");
        }
        Ok(())
    }
}
