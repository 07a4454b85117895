//! Bounding box based image cropping.

use crate::core::errors::{PosterError, PosterResult};
use crate::processors::geometry::BoundingBox;
use image::{RgbImage, imageops};

/// Crops a region out of the source image.
///
/// The box is clamped to the image boundaries first; a crop that ends up
/// empty or degenerate is rejected with an invalid-region error, which is
/// fatal to the region only.
pub fn crop_region(image: &RgbImage, bbox: &BoundingBox) -> PosterResult<RgbImage> {
    let clamped = bbox
        .clamp_to(image.width(), image.height())
        .ok_or_else(|| {
            PosterError::invalid_region(format!(
                "crop region ({}, {}) to ({}, {}) is outside the {}x{} image",
                bbox.x1,
                bbox.y1,
                bbox.x2,
                bbox.y2,
                image.width(),
                image.height()
            ))
        })?;

    let (x, y, width, height) = clamped.to_pixel_rect();
    if width == 0 || height == 0 {
        return Err(PosterError::invalid_region(format!(
            "crop region ({x}, {y}) has zero area"
        )));
    }

    // Immutable zero-copy view, materialized into an owned buffer.
    Ok(imageops::crop_imm(image, x, y, width, height).to_image())
}
