//! Command-line definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Encode, decode and render operational fact sheets carried in QR codes.
#[derive(Parser, Debug)]
#[command(name = "memento")]
#[command(version)]
#[command(about = "Operational fact sheets in QR codes")]
pub struct Cli {
    /// JSON configuration file (env: MEMENTO_CONFIG)
    #[arg(short, long, env = "MEMENTO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (json, plain)
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Plain,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode a sheet (any accepted shape) into a QR payload
    Encode {
        /// Sheet file, `-` for stdin
        input: String,
        /// Write the bare compact JSON instead of a compressed envelope
        #[arg(long)]
        no_compress: bool,
        /// Print only the QR text
        #[arg(long)]
        payload_only: bool,
    },

    /// Decode a scanned QR payload
    Decode {
        /// Payload file, `-` for stdin
        input: String,
    },

    /// Decode a payload and compile its prompt
    Render {
        /// Payload file, `-` for stdin
        input: String,
        /// Field value, `id=value` (repeatable)
        #[arg(long = "set", value_name = "ID=VALUE")]
        values: Vec<String>,
        /// Coordinates for a geoloc field, `id=lat,lng` (repeatable)
        #[arg(long = "geo", value_name = "ID=LAT,LNG")]
        geo: Vec<String>,
        /// Free text appended after the prompt
        #[arg(long)]
        addendum: Option<String>,
        /// Live preview: keep unfilled required placeholders, fail if one is missing
        #[arg(long)]
        preview: bool,
    },

    /// Show render parameters for a payload length
    Size {
        /// Payload length in bytes
        length: usize,
    },

    /// Print the effective configuration
    Config,
}

/// Split `id=value`.
pub fn parse_assignment(raw: &str) -> Option<(&str, &str)> {
    let (id, value) = raw.split_once('=')?;
    let id = id.trim();
    (!id.is_empty()).then_some((id, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render() {
        let cli = Cli::parse_from([
            "memento", "--format", "json", "render", "sheet.txt", "--set", "site=Gare", "--geo",
            "pos=45.1,3.2", "--preview",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Render { input, values, geo, preview, addendum } => {
                assert_eq!(input, "sheet.txt");
                assert_eq!(values, vec!["site=Gare"]);
                assert_eq!(geo, vec!["pos=45.1,3.2"]);
                assert!(preview);
                assert!(addendum.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("a=b=c"), Some(("a", "b=c")));
        assert_eq!(parse_assignment(" a =x"), Some(("a", "x")));
        assert_eq!(parse_assignment("=x"), None);
        assert_eq!(parse_assignment("novalue"), None);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
