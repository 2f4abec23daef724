//! Rendering parameters derived from payload length.

use memento_core::{SizeStep, SizingConfig};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EncodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCorrection {
    L,
    M,
    H,
}

impl ErrorCorrection {
    /// Byte-mode capacity of a version-40 symbol.
    pub fn capacity(&self) -> usize {
        match self {
            Self::L => 2953,
            Self::M => 2331,
            Self::H => 1273,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::L => "L",
            Self::M => "M",
            Self::H => "H",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderParams {
    pub module_pixels: u32,
    pub error_correction: ErrorCorrection,
}

/// Step function from payload length to [`RenderParams`].
#[derive(Debug, Clone)]
pub struct SizingPolicy {
    steps: Vec<SizeStep>,
    ceiling: u32,
    headroom_pct: u8,
}

impl SizingPolicy {
    pub fn new(config: &SizingConfig) -> Self {
        let mut steps = config.steps.clone();
        steps.sort_by_key(|s| s.up_to);
        // Running maximum keeps the table non-decreasing whatever the config says.
        let mut floor = 0;
        for step in &mut steps {
            floor = floor.max(step.module_pixels);
            step.module_pixels = floor;
        }
        Self {
            steps,
            ceiling: floor.max(config.max_module_pixels),
            headroom_pct: config.headroom_pct.clamp(1, 100),
        }
    }

    pub fn module_pixels(&self, payload_len: usize) -> u32 {
        self.steps
            .iter()
            .find(|s| payload_len <= s.up_to)
            .map(|s| s.module_pixels)
            .unwrap_or(self.ceiling)
    }

    /// Strongest level that still leaves headroom, `L` otherwise.
    pub fn error_correction(&self, payload_len: usize) -> ErrorCorrection {
        [ErrorCorrection::H, ErrorCorrection::M]
            .into_iter()
            .find(|level| payload_len.saturating_mul(100) <= level.capacity() * usize::from(self.headroom_pct))
            .unwrap_or(ErrorCorrection::L)
    }

    pub fn render_size(&self, payload_len: usize) -> RenderParams {
        RenderParams {
            module_pixels: self.module_pixels(payload_len),
            error_correction: self.error_correction(payload_len),
        }
    }

    /// Like [`SizingPolicy::render_size`] but refuses payloads the
    /// symbol cannot hold, before anything is handed to a renderer.
    pub fn plan(&self, payload_len: usize) -> Result<RenderParams, EncodeError> {
        let params = self.render_size(payload_len);
        let capacity = params.error_correction.capacity();
        if payload_len > capacity {
            return Err(EncodeError::PayloadTooLarge {
                length: payload_len,
                capacity,
                level: params.error_correction,
            });
        }
        tracing::debug!(
            payload_len,
            module_pixels = params.module_pixels,
            level = %params.error_correction,
            "planned render"
        );
        Ok(params)
    }
}

impl Default for SizingPolicy {
    fn default() -> Self {
        Self::new(&SizingConfig::default())
    }
}

/// [`SizingPolicy::render_size`] under the default table.
pub fn render_size(payload_len: usize) -> RenderParams {
    SizingPolicy::default().render_size(payload_len)
}
