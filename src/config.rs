use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CanvasResult;
use crate::text::TextRasterizer;

/// Startup settings for a canvas session.
///
/// Every field falls back to its default when missing from the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// JPEG quality used on export, 1-100
    pub jpeg_quality: u8,
    /// Directory `drawing.jpg` is written to on native targets
    pub export_dir: PathBuf,
    /// Pixel size of committed text
    pub font_size: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            jpeg_quality: 92,
            export_dir: PathBuf::from("."),
            font_size: TextRasterizer::DEFAULT_SIZE,
        }
    }
}

impl CanvasConfig {
    pub const FILE_NAME: &'static str = "canvas_config.json";

    pub fn from_json(json: &str) -> CanvasResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Loads `path` if it exists, otherwise the defaults. A file that exists
    /// but fails to parse is logged and ignored.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Ignoring configuration {}: {}", path.display(), err);
                Self::default()
            }
        }
    }
}
