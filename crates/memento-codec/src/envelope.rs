//! Compression envelope: zlib-deflated compact JSON, Base64 encoded, in
//! a small tagged JSON wrapper.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{Read, Write};

use crate::alias::{self, AliasGroups};
use crate::error::CompressionError;

/// The single format tag this codec writes.
pub const FORMAT_TAG: &str = "pako-base64-v1";

/// Compact schema generation written when schema versions are enabled.
pub const COMPACT_SCHEMA_VERSION: u32 = 1;

/// First-generation wrappers wrote `{"z", "d"}`.
const ENVELOPE_ALIASES: AliasGroups = &[&["formatTag", "z"], &["data", "d"]];

/// Byte-level compression behind the envelope.
pub trait CompressionBackend: Send + Sync {
    fn deflate(&self, bytes: &[u8]) -> Result<Vec<u8>, CompressionError>;

    /// Inflate, failing once the output would exceed `limit` bytes.
    fn inflate(&self, bytes: &[u8], limit: usize) -> Result<Vec<u8>, CompressionError>;
}

/// zlib stream (DEFLATE with zlib header), default level.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zlib;

impl CompressionBackend for Zlib {
    fn deflate(&self, bytes: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(bytes)
            .map_err(|e| CompressionError::Unavailable(e.to_string()))?;
        encoder.finish().map_err(|e| CompressionError::Unavailable(e.to_string()))
    }

    fn inflate(&self, bytes: &[u8], limit: usize) -> Result<Vec<u8>, CompressionError> {
        if bytes.is_empty() {
            return Err(CompressionError::Inflate("empty stream".into()));
        }
        let mut out = Vec::new();
        // One byte past the limit tells "exactly at limit" from "over".
        ZlibDecoder::new(bytes)
            .take(limit as u64 + 1)
            .read_to_end(&mut out)
            .map_err(|e| CompressionError::Inflate(e.to_string()))?;
        if out.len() > limit {
            return Err(CompressionError::TooLarge { limit });
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "formatTag", alias = "z")]
    pub format_tag: String,
    #[serde(alias = "d")]
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<u32>,
}

impl Envelope {
    /// Deflate and encode `compact_json`.
    pub fn pack(compact_json: &str, backend: &dyn CompressionBackend) -> Result<Self, CompressionError> {
        let deflated = backend.deflate(compact_json.as_bytes())?;
        Ok(Self { format_tag: FORMAT_TAG.to_string(), data: BASE64.encode(deflated), schema: None })
    }

    pub fn with_schema(mut self, version: u32) -> Self {
        self.schema = Some(version);
        self
    }

    /// Exact inverse of [`Envelope::pack`].
    pub fn unpack(&self, backend: &dyn CompressionBackend, limit: usize) -> Result<String, CompressionError> {
        let bytes = BASE64.decode(self.data.trim())?;
        let inflated = backend.inflate(&bytes, limit)?;
        String::from_utf8(inflated).map_err(|_| CompressionError::NotUtf8)
    }

    /// Wire text rendered into the QR symbol.
    pub fn to_wire(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Recognize an envelope inside an already parsed JSON value.
    ///
    /// Only objects carrying our format tag and a string payload count;
    /// anything else is left to structural classification.
    pub fn detect(value: &Value) -> Option<Self> {
        let mut obj = value.as_object()?.clone();
        alias::collapse(&mut obj, ENVELOPE_ALIASES);
        let envelope = Self::deserialize(Value::Object(obj)).ok()?;
        (envelope.format_tag == FORMAT_TAG).then_some(envelope)
    }
}
