//! Image loading helpers.

use crate::core::errors::{PosterError, PosterResult};
use image::RgbImage;
use std::path::Path;

/// Loads an image from disk as RGB.
///
/// Decode failures map to [`PosterError::Decode`], the one error that aborts
/// a whole extraction.
pub fn load_image(path: impl AsRef<Path>) -> PosterResult<RgbImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|e| PosterError::decode(path, e))?;
    Ok(image.to_rgb8())
}
