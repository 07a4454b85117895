//! Request-scoped mutable state for one extraction.
//!
//! All shared mutable resources of a request (annotated overlays, artifact
//! counters, the contrast accumulator) live in this context object and are
//! passed explicitly into every handler call. The context is created inside
//! `extract_components` and never outlives the request, so concurrent
//! requests cannot share it.

use crate::core::config::ExtractorConfig;
use crate::domain::region::ComponentKind;
use crate::evaluators::color_contrast::ColorContrastEvaluator;
use crate::models::ModelSet;
use crate::pipeline::artifacts::ArtifactStore;
use crate::processors::geometry::BoundingBox;
use crate::utils::visualization::LabelStyle;
use image::RgbImage;
use tracing::warn;

/// Mutable state owned by a single extraction request.
pub(crate) struct RequestContext<'a> {
    /// The extractor configuration.
    pub config: &'a ExtractorConfig,
    /// Shared read-only model handles.
    pub models: &'a ModelSet,
    /// The decoded poster raster; crops during finalize come from here.
    pub original: &'a RgbImage,
    /// The request's artifact store and per-kind counters.
    pub artifacts: ArtifactStore,
    /// The extracted-components overlay.
    pub overlay: RgbImage,
    /// The logos-only overlay, created lazily on the first logo.
    pub logo_overlay: Option<RgbImage>,
    /// The contrast accumulator with its own overlay.
    pub contrast: ColorContrastEvaluator,
    /// Annotation styling shared by all overlays.
    pub style: LabelStyle,
}

impl RequestContext<'_> {
    /// Contrast-evaluates a crop, isolating per-region failures.
    ///
    /// An empty or degenerate crop is fatal to the region only: the failure
    /// is logged and scanning continues without a contrast entry.
    pub fn evaluate_contrast(&mut self, kind: ComponentKind, bbox: &BoundingBox, crop: &RgbImage) {
        if let Err(e) = self.contrast.evaluate_section(kind, bbox, crop, &self.style) {
            warn!("contrast evaluation skipped for {kind}: {e}");
        }
    }
}
