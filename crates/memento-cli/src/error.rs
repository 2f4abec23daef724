//! CLI error types and exit codes.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] memento_core::CoreError),

    #[error("Cannot decode sheet: {0}")]
    Decode(#[from] memento_codec::DecodeError),

    #[error("Cannot encode sheet: {0}")]
    Encode(#[from] memento_codec::EncodeError),

    #[error("Prompt incomplete, missing required fields: {}", missing.join(", "))]
    IncompletePrompt { missing: Vec<String> },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub fn invalid_arg(message: impl Into<String>) -> Self {
        CliError::InvalidArgument { message: message.into() }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgument { .. } => 2,
            CliError::Config(_) => 3,
            CliError::Decode(_) => 4,
            CliError::Encode(
                memento_codec::EncodeError::PayloadTooLarge { .. }
                | memento_codec::EncodeError::ExpandedTooLarge { .. },
            ) => 6,
            CliError::Encode(_) => 5,
            CliError::IncompletePrompt { .. } => 7,
            CliError::Json(_) => 8,
            CliError::Other(_) => 1,
        }
    }
}
