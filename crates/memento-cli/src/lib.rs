//! `memento` command-line interface.
//!
//! ```text
//! memento [OPTIONS] <COMMAND>
//!
//! Commands:
//!   encode   Encode a sheet (any accepted shape) into a QR payload
//!   decode   Decode a scanned QR payload
//!   render   Decode a payload and compile its prompt
//!   size     Show render parameters for a payload length
//!   config   Print the effective configuration
//!
//! Options:
//!   -c, --config <CONFIG>  JSON configuration file [env: MEMENTO_CONFIG]
//!   -f, --format <FORMAT>  Output format (json, plain) [default: plain]
//!   -v, --verbose          Enable verbose output
//! ```
//!
//! ## Compile a scanned sheet
//! ```text
//! memento render scan.txt --set site="Gare SNCF" --geo pos=45.76,4.83 \
//!   --addendum "Vent d'ouest fort"
//! ```

pub mod commands;
pub mod error;
pub mod handler;
pub mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use error::{CliError, CliResult};
