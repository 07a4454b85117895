//! Region and component-kind types.
//!
//! A [`Region`] is one detected bounding box together with its resolved
//! semantic label and crop. [`ComponentKind`] is the closed set of semantic
//! labels a region can carry after classification.

use crate::core::errors::{PosterError, PosterResult};
use crate::processors::geometry::BoundingBox;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of semantic component kinds a poster region resolves to.
///
/// Kind names double as artifact filename stems (`{kind}_{n}.jpg`) and as
/// the `type` field of report entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// The poster's single resolved title.
    Title,
    /// A title candidate demoted during finalization.
    Heading,
    /// Body text.
    PlainText,
    /// A figure classified as a pie chart.
    PieChart,
    /// A figure classified as a bar graph.
    BarGraphs,
    /// A figure classified as a line graph.
    LineGraph,
    /// A figure with no more specific classification.
    Diagram,
    /// A small logo-like figure.
    Logo,
    /// A figure or table caption, or a table footnote.
    Caption,
    /// A table.
    Table,
    /// The author block associated with the title.
    Authors,
}

impl ComponentKind {
    /// All kinds, in a stable order.
    pub const ALL: [ComponentKind; 11] = [
        ComponentKind::Title,
        ComponentKind::Heading,
        ComponentKind::PlainText,
        ComponentKind::PieChart,
        ComponentKind::BarGraphs,
        ComponentKind::LineGraph,
        ComponentKind::Diagram,
        ComponentKind::Logo,
        ComponentKind::Caption,
        ComponentKind::Table,
        ComponentKind::Authors,
    ];

    /// The snake_case name used in filenames and report entries.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Title => "title",
            ComponentKind::Heading => "heading",
            ComponentKind::PlainText => "plain_text",
            ComponentKind::PieChart => "pie_chart",
            ComponentKind::BarGraphs => "bar_graphs",
            ComponentKind::LineGraph => "line_graph",
            ComponentKind::Diagram => "diagram",
            ComponentKind::Logo => "logo",
            ComponentKind::Caption => "caption",
            ComponentKind::Table => "table",
            ComponentKind::Authors => "authors",
        }
    }

    /// Returns true for kinds whose crops carry readable text, which makes
    /// them subject to font-size measurement.
    pub fn is_text_bearing(&self) -> bool {
        matches!(
            self,
            ComponentKind::PlainText
                | ComponentKind::Heading
                | ComponentKind::Authors
                | ComponentKind::Caption
        )
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified poster region: semantic kind, bounding box in original-image
/// pixel space, and the cropped raster.
///
/// Created once per classified detector row and consumed immediately by the
/// artifact store; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Region {
    /// The resolved semantic kind.
    pub kind: ComponentKind,
    /// Bounding box relative to the original (non-resized) poster raster.
    pub bbox: BoundingBox,
    /// The cropped image for this region.
    pub crop: RgbImage,
}

impl Region {
    /// Creates a region, enforcing the bbox invariant (`x1 < x2, y1 < y2`)
    /// and a non-empty crop.
    pub fn new(kind: ComponentKind, bbox: BoundingBox, crop: RgbImage) -> PosterResult<Self> {
        if !bbox.is_valid() {
            return Err(PosterError::invalid_region(format!(
                "degenerate bounding box ({}, {}) to ({}, {}) for {kind}",
                bbox.x1, bbox.y1, bbox.x2, bbox.y2
            )));
        }
        if crop.width() == 0 || crop.height() == 0 {
            return Err(PosterError::invalid_region(format!(
                "empty crop for {kind}"
            )));
        }
        Ok(Self { kind, bbox, crop })
    }
}
