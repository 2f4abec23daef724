//! Command handlers.

use anyhow::Context;
use memento_codec::Codec;
use memento_core::{FieldKind, MementoConfig, Record};
use memento_prompt::{FieldValue, PromptInput, RenderMode, Renderer};
use std::io::{self, Read, Write};

use crate::commands::{parse_assignment, Cli, Commands, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output;

/// Run the CLI, writing results to stdout.
pub fn run(cli: Cli) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with(cli, &mut out)
}

pub fn run_with(cli: Cli, out: &mut dyn Write) -> CliResult<()> {
    let config = load_config(&cli)?;
    let format = cli.format;
    match cli.command {
        Commands::Encode { input, no_compress, payload_only } => {
            handle_encode(config, &input, no_compress, payload_only, format, out)
        }
        Commands::Decode { input } => handle_decode(&config, &input, format, out),
        Commands::Render { input, values, geo, addendum, preview } => {
            let mode = if preview { RenderMode::Preview } else { RenderMode::Final };
            handle_render(&config, &input, &values, &geo, addendum, mode, format, out)
        }
        Commands::Size { length } => handle_size(&config, length, format, out),
        Commands::Config => Ok(output::write_json(out, &config).context("writing output")?),
    }
}

fn load_config(cli: &Cli) -> CliResult<MementoConfig> {
    match &cli.config {
        Some(path) => Ok(MementoConfig::from_json_file(path)?),
        None => Ok(MementoConfig::default()),
    }
}

/// File contents, or stdin for `-`.
fn read_input(input: &str) -> CliResult<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("reading stdin")?;
        return Ok(text);
    }
    let text = std::fs::read_to_string(input).with_context(|| format!("reading {input}"))?;
    Ok(text)
}

fn handle_encode(
    mut config: MementoConfig,
    input: &str,
    no_compress: bool,
    payload_only: bool,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    if no_compress {
        config.codec.compress = false;
    }
    let codec = Codec::new(&config);
    let record = codec.decode(&read_input(input)?)?;
    let sheet = codec.encode(&record)?;
    tracing::info!(title = %sheet.record.title, payload_len = sheet.payload_len, "sheet encoded");
    if payload_only {
        writeln!(out, "{}", sheet.payload).context("writing output")?;
        return Ok(());
    }
    output::write_encoded(out, &sheet, format).context("writing output")?;
    Ok(())
}

fn handle_decode(config: &MementoConfig, input: &str, format: OutputFormat, out: &mut dyn Write) -> CliResult<()> {
    let record = Codec::new(config).decode(&read_input(input)?)?;
    output::write_record(out, &record, format).context("writing output")?;
    Ok(())
}

/// Collect `--set` and `--geo` arguments for `record`.
pub fn collect_input(
    record: &Record,
    values: &[String],
    geo: &[String],
    addendum: Option<String>,
) -> CliResult<PromptInput> {
    let mut input = PromptInput::new();
    for raw in values {
        let (id, value) = parse_assignment(raw)
            .ok_or_else(|| CliError::invalid_arg(format!("expected ID=VALUE, got {raw:?}")))?;
        let value = match record.field(id) {
            Some(field) if field.kind == FieldKind::Geoloc => FieldValue::parse_geo(value),
            Some(_) => FieldValue::from(value),
            None => {
                tracing::warn!(id, "value for a field the sheet does not declare");
                FieldValue::from(value)
            }
        };
        input.set(id, value);
    }
    for raw in geo {
        let (id, coords) = parse_assignment(raw)
            .ok_or_else(|| CliError::invalid_arg(format!("expected ID=LAT,LNG, got {raw:?}")))?;
        match FieldValue::parse_geo(coords) {
            point @ FieldValue::Geo { .. } => input.set(id, point),
            FieldValue::Text(_) => {
                return Err(CliError::invalid_arg(format!("invalid coordinates for {id}: {coords:?}")))
            }
        }
    }
    input.addendum = addendum;
    Ok(input)
}

#[allow(clippy::too_many_arguments)]
fn handle_render(
    config: &MementoConfig,
    input: &str,
    values: &[String],
    geo: &[String],
    addendum: Option<String>,
    mode: RenderMode,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    let record = Codec::new(config).decode(&read_input(input)?)?;
    let prompt_input = collect_input(&record, values, geo, addendum)?;
    let rendered = Renderer::new(config.render.clone()).render(&record, &prompt_input, mode);
    output::write_prompt(out, &rendered, format).context("writing output")?;
    if mode == RenderMode::Preview && !rendered.is_complete() {
        return Err(CliError::IncompletePrompt { missing: rendered.missing_required });
    }
    Ok(())
}

fn handle_size(config: &MementoConfig, length: usize, format: OutputFormat, out: &mut dyn Write) -> CliResult<()> {
    let params = Codec::new(config).sizing().plan(length)?;
    match format {
        OutputFormat::Json => output::write_json(out, &params),
        OutputFormat::Plain => output::write_render_params(out, &params),
    }
    .context("writing output")?;
    Ok(())
}
