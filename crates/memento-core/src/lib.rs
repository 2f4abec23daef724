//! Core data model for operational fact sheets ("mémentos").
//!
//! A sheet is a titled prompt template with a handful of typed input
//! fields. This crate holds the long-form [`Record`] shape, the shared
//! configuration and the placeholder grammar used by both the codec and
//! the prompt renderer.

pub mod config;
pub mod error;
pub mod flag;
pub mod placeholder;
pub mod record;

pub use config::{CodecConfig, MementoConfig, RenderConfig, SizeStep, SizingConfig};
pub use error::{CoreError, Result};
pub use record::{Confidence, Field, FieldKind, Record, MAX_CONFIDENCE};

#[cfg(test)]
mod tests;
