//! Export configuration

use crate::pdf::PdfExportOptions;
use preview_dom::{mm_to_px, mm_to_pt};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Physical page dimensions in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSize {
    /// ISO A4 portrait
    pub const A4: PageSize = PageSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    /// US Letter portrait
    pub const LETTER: PageSize = PageSize {
        width_mm: 215.9,
        height_mm: 279.4,
    };

    pub fn width_pt(&self) -> f64 {
        mm_to_pt(self.width_mm)
    }

    pub fn height_pt(&self) -> f64 {
        mm_to_pt(self.height_mm)
    }

    /// CSS length text for the page width, e.g. `210mm`
    pub fn width_css(&self) -> String {
        format!("{}mm", self.width_mm)
    }

    pub fn height_css(&self) -> String {
        format!("{}mm", self.height_mm)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Tunables for one exporter instance.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    /// Pause before capture so layout can settle
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Pixels per inch used to pin the capture width
    #[serde(default = "default_dpi")]
    pub dpi: f64,
    /// Supersampling factor over CSS pixels
    #[serde(default = "default_raster_scale")]
    pub raster_scale: f64,
    #[serde(default)]
    pub page_size: PageSize,
    /// File stem used when the resume has no name
    #[serde(default = "default_fallback_file_stem")]
    pub fallback_file_stem: String,
    #[serde(default)]
    pub pdf: PdfExportOptions,
}

fn default_settle_delay_ms() -> u64 {
    100
}

fn default_dpi() -> f64 {
    96.0
}

fn default_raster_scale() -> f64 {
    2.0
}

fn default_fallback_file_stem() -> String {
    "Resume".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            dpi: default_dpi(),
            raster_scale: default_raster_scale(),
            page_size: PageSize::default(),
            fallback_file_stem: default_fallback_file_stem(),
            pdf: PdfExportOptions::default(),
        }
    }
}

impl ExportConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Capture width in CSS pixels: the page width at the configured DPI
    pub fn capture_width_px(&self) -> u32 {
        mm_to_px(self.page_size.width_mm, self.dpi).round().max(1.0) as u32
    }

    /// Width the rasterizer must return, in device pixels
    pub fn bitmap_width_px(&self) -> u32 {
        (f64::from(self.capture_width_px()) * self.raster_scale)
            .round()
            .max(1.0) as u32
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load from a JSON file.
    ///
    /// A missing file yields defaults. A file that does not parse is logged
    /// and also yields defaults; only IO failures are errors.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = tokio::fs::read_to_string(path).await?;
        Ok(Self::parse_or_default(&content, path))
    }

    /// Blocking variant of [`ExportConfig::load`]
    pub fn load_sync(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse_or_default(&content, path))
    }

    fn parse_or_default(content: &str, path: &Path) -> Self {
        match Self::from_json(content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "Failed to parse export config {}, using defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}
