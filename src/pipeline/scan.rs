//! Buffered candidates accumulated during the scan phase.
//!
//! The scan pass over detector output defers two decisions to whole-poster
//! finalization: which title candidate is the real title, and which author
//! candidate belongs to it. Candidates are buffered here in detection order;
//! the finalize pass consumes the buffers by value, making the scan-then-
//! finalize dependency explicit in the types.

use crate::models::LogoStyle;
use crate::processors::geometry::BoundingBox;

/// A buffered title-labeled detection awaiting finalization.
#[derive(Debug, Clone)]
pub struct TitleCandidate {
    /// Detection-order id of the originating detector row.
    pub component_id: usize,
    /// Bounding box in original-image pixel space.
    pub bbox: BoundingBox,
    /// Cached bbox area used for winner selection.
    pub area: f32,
}

/// A plain-text detection that passed the author-likeness heuristic.
#[derive(Debug, Clone)]
pub struct AuthorCandidate {
    /// Bounding box in original-image pixel space.
    pub bbox: BoundingBox,
    /// The OCR'd text of the block.
    pub text: String,
}

/// A detected logo, recorded by the figure handler.
#[derive(Debug, Clone)]
pub struct LogoInfo {
    /// URL of the persisted logo crop.
    pub image: String,
    /// Style assigned by the logo classifier.
    pub style: LogoStyle,
}

/// The candidate buffers filled during one scan pass.
#[derive(Debug, Default)]
pub struct ScanBuffers {
    /// Title candidates, in detection order.
    pub titles: Vec<TitleCandidate>,
    /// Author candidates, in detection order.
    pub authors: Vec<AuthorCandidate>,
    /// Detected logos, in detection order.
    pub logos: Vec<LogoInfo>,
}

impl ScanBuffers {
    /// Creates empty buffers for a new scan.
    pub fn new() -> Self {
        Self::default()
    }
}
