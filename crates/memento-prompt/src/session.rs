use memento_core::{MementoConfig, Record};
use std::fmt;

use crate::renderer::{RenderedPrompt, Renderer};
use crate::values::{FieldValue, PromptInput};

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No sheet loaded.
    Empty,
    /// Sheet loaded, required input missing.
    Editing,
    /// Every required field has a value.
    Ready,
}

/// The sheet currently on screen and what the user typed for it.
///
/// Owned by the calling layer; the codec and renderer only ever borrow
/// from it.
pub struct Session {
    record: Option<Record>,
    input: PromptInput,
    renderer: Renderer,
}

impl Session {
    pub fn new(config: &MementoConfig) -> Self {
        Self { record: None, input: PromptInput::default(), renderer: Renderer::new(config.render.clone()) }
    }

    /// Replace the sheet; previous values do not carry over.
    pub fn load(&mut self, record: Record) {
        tracing::debug!(title = %record.title, fields = record.fields.len(), "sheet loaded");
        self.record = Some(record);
        self.input = PromptInput::default();
    }

    /// Forget the sheet and all input.
    pub fn reset(&mut self) {
        self.record = None;
        self.input = PromptInput::default();
    }

    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    pub fn input(&self) -> &PromptInput {
        &self.input
    }

    pub fn set_value(&mut self, id: impl Into<String>, value: impl Into<FieldValue>) {
        self.input.set(id, value);
    }

    pub fn set_geo(&mut self, id: impl Into<String>, latitude: f64, longitude: f64) {
        self.input.set_geo(id, latitude, longitude);
    }

    pub fn set_addendum(&mut self, text: impl Into<String>) {
        self.input.addendum = Some(text.into());
    }

    pub fn state(&self) -> SessionState {
        match &self.record {
            None => SessionState::Empty,
            Some(record) => {
                let complete = record
                    .fields
                    .iter()
                    .filter(|f| f.required)
                    .all(|f| self.input.get(&f.id).is_some());
                if complete { SessionState::Ready } else { SessionState::Editing }
            }
        }
    }

    /// Live-preview pass, `None` when no sheet is loaded.
    pub fn preview(&self) -> Option<RenderedPrompt> {
        self.record.as_ref().map(|r| self.renderer.preview(r, &self.input))
    }

    /// Final pass, `None` when no sheet is loaded.
    pub fn compile(&self) -> Option<RenderedPrompt> {
        self.record.as_ref().map(|r| self.renderer.compile(r, &self.input))
    }

    /// A non-empty prompt can be handed off.
    pub fn is_ready(&self) -> bool {
        self.state() == SessionState::Ready
            && self.compile().is_some_and(|p| !p.text.trim().is_empty())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&MementoConfig::default())
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.record.as_ref().map(|r| r.title.as_str()).unwrap_or("-");
        write!(f, "Session(sheet={}, values={}, state={:?})", title, self.input.values.len(), self.state())
    }
}
