//! Image fitting
//!
//! Scales an image into a box while preserving its aspect ratio, and centers
//! it in the part of the cell reserved for it.

use crate::types::{CardError, Result};

use super::Rect;

/// Part of a cell reserved for the illustration, relative to the cell's
/// lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRegion {
    pub cell_width: f32,
    /// Bottom of the region above the cell bottom
    pub offset_y: f32,
    pub height: f32,
    /// Largest size the scaled image may take
    pub max_width: f32,
    pub max_height: f32,
}

impl ImageRegion {
    /// Region inside `cell` from `offset_y` up to the top, with `margin`
    /// taken off the allowed width and height.
    pub fn upper_part(cell: Rect, offset_y: f32, margin: f32) -> Self {
        let height = cell.height - offset_y;
        Self {
            cell_width: cell.width,
            offset_y,
            height,
            max_width: cell.width - margin,
            max_height: height - margin,
        }
    }

    /// Region for a card without a question: the cell less `margin` in
    /// height, anchored at the cell bottom, with the same margin taken off
    /// the allowed size again.
    pub fn without_question(cell: Rect, margin: f32) -> Self {
        let height = cell.height - margin;
        Self {
            cell_width: cell.width,
            offset_y: 0.0,
            height,
            max_width: cell.width - margin,
            max_height: height - margin,
        }
    }

    /// Center of the region in page coordinates for a cell at `cell`.
    pub fn center_in(&self, cell: Rect) -> (f32, f32) {
        (
            cell.x + self.cell_width / 2.0,
            cell.y + self.offset_y + self.height / 2.0,
        )
    }
}

/// Scaled size and offset relative to the cell's lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageFit {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl ImageFit {
    /// Target rectangle in page coordinates.
    pub fn rect_in(&self, cell: Rect) -> Rect {
        Rect::new(
            cell.x + self.offset_x,
            cell.y + self.offset_y,
            self.width,
            self.height,
        )
    }
}

/// Largest `(width, height)` with the natural aspect ratio inside the box.
///
/// Returns `None` when any input is not a positive finite number.
pub fn scale_to_fit(
    natural_width: f32,
    natural_height: f32,
    max_width: f32,
    max_height: f32,
) -> Option<(f32, f32)> {
    let positive = |v: f32| v.is_finite() && v > 0.0;
    if ![natural_width, natural_height, max_width, max_height]
        .into_iter()
        .all(positive)
    {
        return None;
    }

    let aspect = natural_width / natural_height;
    if max_width / max_height > aspect {
        // Box is relatively wider: height binds
        Some((max_height * aspect, max_height))
    } else {
        Some((max_width, max_width / aspect))
    }
}

/// Fit an image of the given pixel size into `region`.
pub fn fit_image(natural_width: u32, natural_height: u32, region: &ImageRegion) -> Result<ImageFit> {
    let (width, height) = scale_to_fit(
        natural_width as f32,
        natural_height as f32,
        region.max_width,
        region.max_height,
    )
    .ok_or_else(|| {
        CardError::ImageUnavailable(format!(
            "cannot fit {natural_width}x{natural_height}px image into {}x{}pt",
            region.max_width, region.max_height
        ))
    })?;

    Ok(ImageFit {
        width,
        height,
        offset_x: (region.cell_width - width) / 2.0,
        offset_y: region.offset_y + (region.height - height) / 2.0,
    })
}
