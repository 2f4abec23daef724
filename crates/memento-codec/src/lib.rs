//! Wire codec for mémento sheets.
//!
//! Stages:
//! 1. Compact mapping — long keys to one-letter keys, empties omitted
//! 2. Envelope — zlib + Base64 inside `{"formatTag", "data"}`
//! 3. Decoder — recognizes compact, legacy and current payloads
//! 4. Sizing — payload length to QR module size and error correction

pub mod alias;
pub mod compact;
pub mod decoder;
pub mod envelope;
pub mod error;
pub mod legacy;
pub mod pipeline;
pub mod sizing;

pub use compact::{compact, expand, CompactRecord};
pub use decoder::{classify, SheetShape};
pub use envelope::{CompressionBackend, Envelope, Zlib, FORMAT_TAG};
pub use error::{CompressionError, DecodeError, EncodeError};
pub use pipeline::{decode, encode, Codec, EncodedSheet};
pub use sizing::{render_size, ErrorCorrection, RenderParams, SizingPolicy};
