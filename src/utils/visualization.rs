//! Overlay drawing for annotated debug imagery.
//!
//! Every handled region leaves exactly one labeled box on the shared
//! annotated copy of the poster; the contrast evaluator and the logos-only
//! overlay reuse the same drawing primitives.

use crate::processors::geometry::BoundingBox;
use ab_glyph::FontVec;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::debug;

/// Styling for overlay annotations.
///
/// When no font could be loaded, boxes are still drawn and label text is
/// skipped.
pub struct LabelStyle {
    /// The font used for label text, if one is available.
    pub font: Option<FontVec>,
    /// The label font scale in pixels.
    pub font_scale: f32,
    /// The thickness of box outlines.
    pub thickness: i32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font: None,
            font_scale: 24.0,
            thickness: 2,
        }
    }
}

impl LabelStyle {
    /// Creates a style with a font loaded from common system locations,
    /// falling back to box-only annotations when none is found.
    pub fn with_system_font() -> Self {
        let font_paths = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];

        for path in &font_paths {
            if let Ok(font_data) = std::fs::read(path)
                && let Ok(font) = FontVec::try_from_vec(font_data)
            {
                debug!("loaded annotation font: {}", path);
                return Self {
                    font: Some(font),
                    ..Self::default()
                };
            }
        }

        debug!("no system font found, overlay labels will be skipped");
        Self::default()
    }
}

/// Draws a labeled hollow box onto the overlay.
///
/// The label is rendered just above the top-left corner, mirroring the
/// placement of the box label in the annotated output imagery.
pub fn draw_labeled_box(
    img: &mut RgbImage,
    bbox: &BoundingBox,
    color: Rgb<u8>,
    label: Option<&str>,
    style: &LabelStyle,
) {
    let Some(rect) = bbox_to_rect(bbox, img.width(), img.height()) else {
        return;
    };

    let bounds = (img.width() as i32, img.height() as i32);
    for thickness in 0..style.thickness {
        let ring = Rect::at(rect.left() - thickness, rect.top() - thickness).of_size(
            rect.width() + (2 * thickness) as u32,
            rect.height() + (2 * thickness) as u32,
        );
        if rect_in_bounds(&ring, bounds.0, bounds.1) {
            draw_hollow_rect_mut(img, ring, color);
        }
    }

    if let (Some(text), Some(font)) = (label, style.font.as_ref()) {
        let text_y = (rect.top() - style.font_scale as i32 - 4).max(0);
        let text_x = rect.left().max(0);
        if text_x < bounds.0 && text_y < bounds.1 {
            draw_text_mut(img, color, text_x, text_y, style.font_scale, font, text);
        }
    }
}

fn rect_in_bounds(rect: &Rect, img_width: i32, img_height: i32) -> bool {
    rect.left() >= 0 && rect.top() >= 0 && rect.right() < img_width && rect.bottom() < img_height
}

/// Converts a bounding box to an integer rect clamped to the image, or
/// `None` when the clamped box has no area.
fn bbox_to_rect(bbox: &BoundingBox, img_width: u32, img_height: u32) -> Option<Rect> {
    let clamped = bbox.clamp_to(img_width, img_height)?;
    let (x, y, width, height) = clamped.to_pixel_rect();
    (width > 0 && height > 0).then(|| Rect::at(x as i32, y as i32).of_size(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_is_drawn_on_overlay() {
        let mut img = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
        let bbox = BoundingBox::from_coords(10.0, 10.0, 50.0, 40.0);
        draw_labeled_box(
            &mut img,
            &bbox,
            Rgb([255, 0, 0]),
            Some("Table"),
            &LabelStyle::default(),
        );
        // The outline passes through the top-left corner of the box.
        assert_eq!(*img.get_pixel(10, 10), Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(49, 10), Rgb([255, 0, 0]));
    }

    #[test]
    fn test_out_of_image_box_is_ignored() {
        let mut img = RgbImage::from_pixel(50, 50, Rgb([255, 255, 255]));
        let before = img.clone();
        let bbox = BoundingBox::from_coords(200.0, 200.0, 300.0, 300.0);
        draw_labeled_box(
            &mut img,
            &bbox,
            Rgb([0, 255, 0]),
            None,
            &LabelStyle::default(),
        );
        assert_eq!(img, before);
    }

    #[test]
    fn test_overflowing_box_is_clamped() {
        let mut img = RgbImage::from_pixel(50, 50, Rgb([0, 0, 0]));
        let bbox = BoundingBox::from_coords(-20.0, -20.0, 30.0, 30.0);
        draw_labeled_box(
            &mut img,
            &bbox,
            Rgb([0, 255, 0]),
            None,
            &LabelStyle::default(),
        );
        assert_eq!(*img.get_pixel(0, 0), Rgb([0, 255, 0]));
    }
}
