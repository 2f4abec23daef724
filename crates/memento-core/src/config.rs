use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MementoConfig {
    pub codec: CodecConfig,
    pub sizing: SizingConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// When false, payloads are written as bare compact JSON.
    pub compress: bool,
    /// Write the compact schema version into the envelope.
    pub emit_schema_version: bool,
    /// Upper bound on the inflated size of an envelope.
    pub max_inflated_bytes: usize,
    pub max_fields: usize,
}

/// Payloads up to `up_to` bytes render at `module_pixels`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeStep {
    pub up_to: usize,
    pub module_pixels: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    pub steps: Vec<SizeStep>,
    /// Used for payloads longer than the last step.
    pub max_module_pixels: u32,
    /// Share of a level's capacity a payload may use before falling
    /// back to a weaker error-correction level.
    pub headroom_pct: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub residue_marker: String,
    pub addendum_label: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            compress: true,
            emit_schema_version: false,
            max_inflated_bytes: 64 * 1024,
            max_fields: 10,
        }
    }
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            steps: vec![
                SizeStep { up_to: 600, module_pixels: 256 },
                SizeStep { up_to: 1200, module_pixels: 320 },
                SizeStep { up_to: 2400, module_pixels: 384 },
                SizeStep { up_to: 3600, module_pixels: 448 },
            ],
            max_module_pixels: 512,
            headroom_pct: 80,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            residue_marker: "(not provided)".into(),
            addendum_label: "Additional information provided by the operator:".into(),
        }
    }
}

impl MementoConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading configuration");
        Self::from_json_str(&text)
    }

    /// Reject values no component can work with.
    pub fn check(&self) -> Result<()> {
        if self.sizing.headroom_pct == 0 || self.sizing.headroom_pct > 100 {
            return Err(CoreError::Config(format!(
                "sizing.headroom_pct must be within 1..=100, got {}",
                self.sizing.headroom_pct
            )));
        }
        if self.codec.max_inflated_bytes == 0 {
            return Err(CoreError::Config("codec.max_inflated_bytes must be positive".into()));
        }
        if self.render.residue_marker.contains("{{") {
            return Err(CoreError::Config("render.residue_marker must not contain a placeholder".into()));
        }
        Ok(())
    }
}
