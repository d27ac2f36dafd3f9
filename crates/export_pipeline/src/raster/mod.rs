//! Rasterization
//!
//! The rasterizer itself is pluggable behind [`Rasterizer`]. [`capture`] is
//! the adapter the PDF path calls: it waits for layout to settle, pins the
//! capture geometry to the print page and validates what comes back.

mod block;

pub use block::BlockRasterizer;

use crate::color::Rgba;
use crate::config::ExportConfig;
use crate::snapshot::{Snapshot, SnapshotError};
use preview_dom::{Document, DomError, NodeId};
use thiserror::Error;

/// Captured pixels, straight-alpha RGBA8
pub type Bitmap = image::RgbaImage;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Unsupported color in {property}: {value}")]
    UnsupportedColor { property: String, value: String },

    #[error("Rasterizer produced an empty bitmap")]
    EmptyBitmap,

    #[error("Bitmap width {actual}px does not match the pinned width {expected}px")]
    WidthMismatch { expected: u32, actual: u32 },

    #[error("Bitmap of {width}x{height} pixels exceeds the capture limit")]
    TooLarge { width: u32, height: u64 },

    #[error("Preview nesting exceeds {limit} levels")]
    TooDeep { limit: usize },

    #[error("Capture failed: {0}")]
    Capture(String),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Dom(#[from] DomError),
}

pub type Result<T> = std::result::Result<T, RasterError>;

/// Capture parameters handed to a [`Rasterizer`]
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    /// Device pixels per CSS pixel
    pub scale: f64,
    /// Element width in CSS pixels
    pub width_px: u32,
    /// Viewport width the element is laid out in
    pub window_width_px: u32,
    /// Fill for transparent areas
    pub background: Rgba,
    pub allow_cross_origin: bool,
    pub logging: bool,
}

impl RasterOptions {
    pub fn for_config(config: &ExportConfig) -> Self {
        let width_px = config.capture_width_px();
        Self {
            scale: config.raster_scale,
            width_px,
            window_width_px: width_px,
            background: Rgba::WHITE,
            allow_cross_origin: true,
            logging: false,
        }
    }

    /// Bitmap width a conforming rasterizer returns
    pub fn expected_width(&self) -> u32 {
        (f64::from(self.width_px) * self.scale).round() as u32
    }
}

/// Converts a laid-out subtree into pixels
#[trait_variant::make(Send)]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(
        &self,
        document: &Document,
        root: NodeId,
        options: &RasterOptions,
    ) -> Result<Bitmap>;
}

/// Settle, capture and validate an attached snapshot
pub async fn capture<R: Rasterizer>(
    rasterizer: &R,
    snapshot: &Snapshot<'_>,
    config: &ExportConfig,
) -> Result<Bitmap> {
    snapshot.ensure_attached()?;

    let delay = config.settle_delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let options = RasterOptions::for_config(config);
    let bitmap = rasterizer
        .rasterize(snapshot.document(), snapshot.root(), &options)
        .await?;
    validate(&bitmap, &options)?;

    tracing::debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        scale = options.scale,
        "Snapshot rasterized"
    );
    Ok(bitmap)
}

fn validate(bitmap: &Bitmap, options: &RasterOptions) -> Result<()> {
    if bitmap.width() == 0 || bitmap.height() == 0 {
        return Err(RasterError::EmptyBitmap);
    }
    let expected = options.expected_width();
    if bitmap.width() != expected {
        return Err(RasterError::WidthMismatch {
            expected,
            actual: bitmap.width(),
        });
    }
    Ok(())
}
