//! Geometric primitives for poster layout processing.
//!
//! Detections and derived regions are axis-aligned rectangles expressed in
//! the original poster raster's pixel space.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in original-image pixel coordinates.
///
/// The pipeline invariant is `x1 < x2` and `y1 < y2`; boxes coming straight
/// from a detector may violate it and are validated with [`BoundingBox::is_valid`]
/// or clamped with [`BoundingBox::clamp_to`] before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// X-coordinate of the top-left corner.
    pub x1: f32,
    /// Y-coordinate of the top-left corner.
    pub y1: f32,
    /// X-coordinate of the bottom-right corner.
    pub x2: f32,
    /// Y-coordinate of the bottom-right corner.
    pub y2: f32,
}

impl BoundingBox {
    /// Creates a bounding box from corner coordinates.
    pub fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Width of the box. Negative for inverted boxes.
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Height of the box. Negative for inverted boxes.
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Area of the box in square pixels.
    pub fn area(&self) -> f32 {
        (self.width() * self.height()).abs()
    }

    /// Center point of the box.
    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Euclidean distance between the centers of two boxes.
    pub fn center_distance(&self, other: &BoundingBox) -> f32 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
    }

    /// Returns true if the box satisfies the `x1 < x2, y1 < y2` invariant.
    pub fn is_valid(&self) -> bool {
        self.x1 < self.x2 && self.y1 < self.y2
    }

    /// Clamps the box to an image of the given dimensions.
    ///
    /// Returns `None` when the clamped box is degenerate (zero width or
    /// height), which happens for detections entirely outside the image.
    pub fn clamp_to(&self, image_width: u32, image_height: u32) -> Option<BoundingBox> {
        let x1 = self.x1.max(0.0).min(image_width as f32);
        let y1 = self.y1.max(0.0).min(image_height as f32);
        let x2 = self.x2.max(0.0).min(image_width as f32);
        let y2 = self.y2.max(0.0).min(image_height as f32);

        let clamped = BoundingBox { x1, y1, x2, y2 };
        clamped.is_valid().then_some(clamped)
    }

    /// Integer pixel rectangle `(x, y, width, height)` suitable for cropping.
    ///
    /// Assumes the box is valid and non-negative; callers clamp first.
    pub fn to_pixel_rect(&self) -> (u32, u32, u32, u32) {
        let x = self.x1 as u32;
        let y = self.y1 as u32;
        let w = (self.x2 - self.x1).round().max(0.0) as u32;
        let h = (self.y2 - self.y1).round().max(0.0) as u32;
        (x, y, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_and_center() {
        let bbox = BoundingBox::from_coords(10.0, 20.0, 110.0, 70.0);
        assert_eq!(bbox.area(), 5000.0);
        assert_eq!(bbox.center(), (60.0, 45.0));
    }

    #[test]
    fn test_center_distance() {
        let a = BoundingBox::from_coords(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::from_coords(30.0, 40.0, 40.0, 50.0);
        // Centers are (5, 5) and (35, 45): a 30-40-50 triangle.
        assert!((a.center_distance(&b) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_to_image_bounds() {
        let bbox = BoundingBox::from_coords(-10.0, -5.0, 30.0, 25.0);
        let clamped = bbox.clamp_to(100, 100).unwrap();
        assert_eq!(clamped, BoundingBox::from_coords(0.0, 0.0, 30.0, 25.0));
    }

    #[test]
    fn test_clamp_rejects_degenerate() {
        // Entirely outside the image.
        let bbox = BoundingBox::from_coords(150.0, 150.0, 200.0, 200.0);
        assert!(bbox.clamp_to(100, 100).is_none());

        // Inverted coordinates.
        let inverted = BoundingBox::from_coords(50.0, 50.0, 10.0, 10.0);
        assert!(inverted.clamp_to(100, 100).is_none());
    }

    #[test]
    fn test_pixel_rect_rounding() {
        let bbox = BoundingBox::from_coords(10.0, 20.0, 50.6, 60.4);
        assert_eq!(bbox.to_pixel_rect(), (10, 20, 41, 40));
    }
}
