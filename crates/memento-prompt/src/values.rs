//! User-supplied field values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A value typed into one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Geo { latitude: f64, longitude: f64 },
}

impl FieldValue {
    /// `"48.85,2.35"` becomes a point when both halves are numbers,
    /// anything else stays text.
    pub fn parse_geo(input: &str) -> Self {
        let parsed = input.split_once(',').and_then(|(lat, lng)| {
            Some((lat.trim().parse::<f64>().ok()?, lng.trim().parse::<f64>().ok()?))
        });
        match parsed {
            Some((latitude, longitude)) if latitude.is_finite() && longitude.is_finite() => {
                Self::Geo { latitude, longitude }
            }
            _ => Self::Text(input.to_string()),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Geo { .. } => false,
        }
    }

    /// Text substituted into the prompt.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Geo { latitude, longitude } => format!("Latitude {latitude}, Longitude {longitude}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Field id → value, plus the free-text addendum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptInput {
    #[serde(default)]
    pub values: HashMap<String, FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addendum: Option<String>,
}

impl PromptInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, id: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(id, value);
        self
    }

    pub fn with_addendum(mut self, text: impl Into<String>) -> Self {
        self.addendum = Some(text.into());
        self
    }

    pub fn set(&mut self, id: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(id.into(), value.into());
    }

    pub fn set_geo(&mut self, id: impl Into<String>, latitude: f64, longitude: f64) {
        self.values.insert(id.into(), FieldValue::Geo { latitude, longitude });
    }

    /// Non-blank value for `id`.
    pub fn get(&self, id: &str) -> Option<&FieldValue> {
        self.values.get(id).filter(|v| !v.is_blank())
    }

    pub fn addendum(&self) -> Option<&str> {
        self.addendum.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}
