use thiserror::Error;

use crate::sizing::ErrorCorrection;

/// Failures inside the compression envelope.
#[derive(Error, Debug)]
pub enum CompressionError {
    #[error("Compression unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid base64 data: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    #[error("Inflate failed: {0}")]
    Inflate(String),
    #[error("Inflated payload exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("Inflated payload is not UTF-8")]
    NotUtf8,
}

/// Why a scanned payload could not be turned into a record.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),
    #[error("Corrupt envelope: {0}")]
    CorruptEnvelope(String),
    #[error("Unknown schema: {0}")]
    UnknownSchema(String),
    #[error("Incomplete record: {0}")]
    IncompleteRecord(String),
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error(
        "Payload of {length} bytes exceeds the QR capacity of {capacity} bytes at \
         error-correction level {level}; shorten the prompt or reduce the field count"
    )]
    PayloadTooLarge { length: usize, capacity: usize, level: ErrorCorrection },
    #[error(
        "Sheet expands to {length} bytes but readers accept at most {limit}; \
         shorten the prompt or reduce the field count"
    )]
    ExpandedTooLarge { length: usize, limit: usize },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<memento_core::CoreError> for EncodeError {
    fn from(err: memento_core::CoreError) -> Self {
        match err {
            memento_core::CoreError::InvalidRecord(msg) => EncodeError::InvalidRecord(msg),
            memento_core::CoreError::Serialization(e) => EncodeError::Serialization(e),
            other => EncodeError::InvalidRecord(other.to_string()),
        }
    }
}
