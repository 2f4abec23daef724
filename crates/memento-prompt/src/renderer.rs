//! Prompt compilation: placeholder substitution and the addendum block.

use memento_core::placeholder::PLACEHOLDER;
use memento_core::{FieldKind, Record, RenderConfig};
use regex::Captures;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::values::{FieldValue, PromptInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Unfilled required and undeclared placeholders stay as `{{id}}`,
    /// unfilled optional ones are blanked.
    Preview,
    /// Unfilled placeholders become the residue marker.
    Final,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPrompt {
    pub text: String,
    pub mode: RenderMode,
    /// Required fields with no usable value, in field order.
    pub missing_required: Vec<String>,
    /// Placeholder ids left without a value, in order of appearance.
    pub unresolved: Vec<String>,
}

impl RenderedPrompt {
    /// Every required field has a value.
    pub fn is_complete(&self) -> bool {
        self.missing_required.is_empty()
    }
}

pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, record: &Record, input: &PromptInput, mode: RenderMode) -> RenderedPrompt {
        let mut resolved: HashMap<&str, String> = HashMap::new();
        let mut missing_required = Vec::new();
        let mut missing_optional: HashSet<&str> = HashSet::new();
        for field in &record.fields {
            match input.get(&field.id) {
                Some(value) => {
                    if field.kind == FieldKind::Geoloc && !matches!(value, FieldValue::Geo { .. }) {
                        tracing::debug!(id = %field.id, "geoloc field given as plain text");
                    }
                    resolved.insert(field.id.as_str(), value.render());
                }
                None if field.required => missing_required.push(field.id.clone()),
                None => {
                    missing_optional.insert(field.id.as_str());
                }
            }
        }

        let mut unresolved: Vec<String> = Vec::new();
        // Single pass: substituted values are never scanned again.
        let text = PLACEHOLDER.replace_all(&record.prompt, |caps: &Captures| {
            let id = &caps[1];
            if let Some(value) = resolved.get(id) {
                return value.clone();
            }
            if !unresolved.iter().any(|u| u == id) {
                unresolved.push(id.to_string());
            }
            match mode {
                RenderMode::Preview if missing_optional.contains(id) => String::new(),
                RenderMode::Preview => caps[0].to_string(),
                RenderMode::Final => self.config.residue_marker.clone(),
            }
        });

        let mut text = text.into_owned();
        if let Some(addendum) = input.addendum() {
            text.push_str("\n\n");
            text.push_str(&self.config.addendum_label);
            text.push('\n');
            text.push_str(addendum);
        }

        if !missing_required.is_empty() {
            tracing::debug!(missing = ?missing_required, ?mode, "required fields without value");
        }
        RenderedPrompt { text, mode, missing_required, unresolved }
    }

    pub fn preview(&self, record: &Record, input: &PromptInput) -> RenderedPrompt {
        self.render(record, input, RenderMode::Preview)
    }

    pub fn compile(&self, record: &Record, input: &PromptInput) -> RenderedPrompt {
        self.render(record, input, RenderMode::Final)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

/// Final pass under the default configuration.
pub fn render(record: &Record, input: &PromptInput) -> String {
    Renderer::default().compile(record, input).text
}
