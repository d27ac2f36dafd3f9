//! Page slicing
//!
//! One tall bitmap is scaled to the page width and placed once per page,
//! shifted up by the height already shown on earlier pages. The page box
//! crops each placement, so slices break at arbitrary pixel rows.

use crate::config::PageSize;
use thiserror::Error;

/// Remaining heights within this many millimetres of zero end pagination
const HEIGHT_TOLERANCE_MM: f64 = 1e-6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Cannot paginate an empty bitmap ({width}x{height})")]
    EmptyBitmap { width: u32, height: u32 },
}

/// Where the image sits on one page, in millimetres from the page top
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub page_index: usize,
    /// Zero on the first page, negative afterwards
    pub offset_y_mm: f64,
}

/// The full set of placements for one image
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page: PageSize,
    pub image_width_mm: f64,
    pub image_height_mm: f64,
    pub placements: Vec<Placement>,
}

impl PageLayout {
    pub fn page_count(&self) -> usize {
        self.placements.len()
    }
}

/// Slice a `width` x `height` pixel bitmap onto pages of `page` size
pub fn paginate(width: u32, height: u32, page: PageSize) -> Result<PageLayout, PaginationError> {
    if width == 0 || height == 0 {
        return Err(PaginationError::EmptyBitmap { width, height });
    }

    let image_width_mm = page.width_mm;
    let image_height_mm = f64::from(height) * page.width_mm / f64::from(width);

    let mut placements = vec![Placement {
        page_index: 0,
        offset_y_mm: 0.0,
    }];
    let mut remaining = image_height_mm - page.height_mm;
    while remaining > HEIGHT_TOLERANCE_MM {
        let page_index = placements.len();
        placements.push(Placement {
            page_index,
            offset_y_mm: -(page_index as f64) * page.height_mm,
        });
        remaining -= page.height_mm;
    }

    tracing::debug!(
        pages = placements.len(),
        image_height_mm,
        "Bitmap paginated"
    );

    Ok(PageLayout {
        page,
        image_width_mm,
        image_height_mm,
        placements,
    })
}
