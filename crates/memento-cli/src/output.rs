//! Output formatting.

use memento_codec::{EncodedSheet, RenderParams};
use memento_core::Record;
use memento_prompt::RenderedPrompt;
use serde::Serialize;
use std::io::{self, Write};

use crate::commands::OutputFormat;

pub fn write_json<T: Serialize>(out: &mut dyn Write, data: &T) -> io::Result<()> {
    let text = serde_json::to_string_pretty(data).map_err(io::Error::other)?;
    writeln!(out, "{text}")
}

pub fn write_encoded(out: &mut dyn Write, sheet: &EncodedSheet, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, sheet),
        OutputFormat::Plain => {
            writeln!(out, "{}", sheet.payload)?;
            writeln!(out)?;
            writeln!(
                out,
                "compact: {} bytes, payload: {} bytes ({})",
                sheet.compact_len,
                sheet.payload_len,
                if sheet.compressed { "compressed" } else { "uncompressed" }
            )?;
            write_render_params(out, &sheet.render)
        }
    }
}

pub fn write_render_params(out: &mut dyn Write, params: &RenderParams) -> io::Result<()> {
    writeln!(out, "module size: {} px, error correction: {}", params.module_pixels, params.error_correction)
}

pub fn write_record(out: &mut dyn Write, record: &Record, format: OutputFormat) -> io::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, record);
    }
    writeln!(out, "{}", record.title)?;
    writeln!(out, "Version: {}", record.version.as_deref().unwrap_or("?"))?;
    if let Some(category) = &record.category {
        writeln!(out, "Category: {category}")?;
    }
    if let Some(objective) = &record.objective {
        writeln!(out, "Objective: {objective}")?;
    }
    if record.fields.is_empty() {
        writeln!(out, "No input fields.")?;
        return Ok(());
    }
    writeln!(out, "Fields:")?;
    for field in &record.fields {
        write!(out, "  - {} [{}]", field.display_label(), field.kind)?;
        if field.required {
            write!(out, " (required)")?;
        }
        if let Some(hint) = &field.hint {
            write!(out, " e.g. {hint}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_prompt(out: &mut dyn Write, prompt: &RenderedPrompt, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, prompt),
        OutputFormat::Plain => writeln!(out, "{}", prompt.text),
    }
}
