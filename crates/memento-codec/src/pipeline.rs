//! Encode/decode pipeline — record → compact → envelope → render plan,
//! and back.

use memento_core::{CodecConfig, MementoConfig, Record};
use serde::Serialize;

use crate::compact::{self, CompactRecord};
use crate::decoder::{decode_with, DecodeOptions};
use crate::envelope::{CompressionBackend, Envelope, Zlib, COMPACT_SCHEMA_VERSION};
use crate::error::{DecodeError, EncodeError};
use crate::sizing::{RenderParams, SizingPolicy};

/// Everything produced for one sheet.
#[derive(Debug, Clone, Serialize)]
pub struct EncodedSheet {
    pub record: Record,
    pub compact: CompactRecord,
    /// Text to render into the QR symbol.
    pub payload: String,
    pub compressed: bool,
    pub compact_len: usize,
    pub payload_len: usize,
    pub reduction_pct: f64,
    pub render: RenderParams,
}

impl EncodedSheet {
    pub fn ratio(&self) -> f64 {
        if self.compact_len == 0 { return 1.0; }
        self.payload_len as f64 / self.compact_len as f64
    }
}

/// Codec bound to one configuration. Holds no per-call state.
pub struct Codec {
    config: CodecConfig,
    sizing: SizingPolicy,
    backend: Box<dyn CompressionBackend>,
}

impl Codec {
    pub fn new(config: &MementoConfig) -> Self {
        Self {
            config: config.codec.clone(),
            sizing: SizingPolicy::new(&config.sizing),
            backend: Box::new(Zlib),
        }
    }

    pub fn with_backend(mut self, backend: Box<dyn CompressionBackend>) -> Self {
        self.backend = backend;
        self
    }

    pub fn sizing(&self) -> &SizingPolicy {
        &self.sizing
    }

    /// Validate, compact, wrap and plan the render of `record`.
    pub fn encode(&self, record: &Record) -> Result<EncodedSheet, EncodeError> {
        record.validate(self.config.max_fields)?;
        let record = record.normalized();
        let compact = compact::compact(&record);
        let compact_json = compact::to_json(&compact)?;
        // A reader refuses to inflate past this, so never write it.
        if compact_json.len() > self.config.max_inflated_bytes {
            return Err(EncodeError::ExpandedTooLarge {
                length: compact_json.len(),
                limit: self.config.max_inflated_bytes,
            });
        }

        let (payload, compressed) = match self.wrap(&compact_json)? {
            Some(wire) => (wire, true),
            None => (compact_json.clone(), false),
        };

        let render = self.sizing.plan(payload.len())?;
        let compact_len = compact_json.len();
        let payload_len = payload.len();
        let reduction_pct = if compact_len > 0 {
            (compact_len as f64 - payload_len as f64) / compact_len as f64 * 100.0
        } else {
            0.0
        };
        tracing::debug!(compact_len, payload_len, compressed, "encoded sheet");

        Ok(EncodedSheet {
            record,
            compact,
            payload,
            compressed,
            compact_len,
            payload_len,
            reduction_pct,
            render,
        })
    }

    /// Envelope wire text, or `None` when compression is off or the
    /// backend is unavailable. Either way the bare compact JSON is a
    /// legal payload.
    fn wrap(&self, compact_json: &str) -> Result<Option<String>, EncodeError> {
        if !self.config.compress {
            return Ok(None);
        }
        let envelope = match Envelope::pack(compact_json, self.backend.as_ref()) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "compression unavailable, writing uncompressed payload");
                return Ok(None);
            }
        };
        let envelope = if self.config.emit_schema_version {
            envelope.with_schema(COMPACT_SCHEMA_VERSION)
        } else {
            envelope
        };
        Ok(Some(envelope.to_wire()?))
    }

    pub fn decode(&self, raw: &str) -> Result<Record, DecodeError> {
        decode_with(
            raw,
            &DecodeOptions {
                backend: self.backend.as_ref(),
                max_inflated_bytes: self.config.max_inflated_bytes,
            },
        )
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(&MementoConfig::default())
    }
}

/// Decode with the default configuration.
pub fn decode(raw: &str) -> Result<Record, DecodeError> {
    Codec::default().decode(raw)
}

/// Encode with the default configuration.
pub fn encode(record: &Record) -> Result<EncodedSheet, EncodeError> {
    Codec::default().encode(record)
}
