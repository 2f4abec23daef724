//! Prompt rendering for decoded sheets.
//!
//! Substitutes `{{id}}` placeholders with user values, in a live-preview
//! or a final pass, and appends the operator's free-text addendum.

pub mod renderer;
pub mod session;
pub mod values;

pub use renderer::{render, RenderMode, RenderedPrompt, Renderer};
pub use session::{Session, SessionState};
pub use values::{FieldValue, PromptInput};

#[cfg(test)]
mod tests;
