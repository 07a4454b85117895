//! The poster component extractor.
//!
//! Orchestrates one extraction request: decode the poster, run the layout
//! detector once, dispatch every detection in emission order, run the two
//! finalize passes, persist the annotated overlays, and assemble the
//! structured report. Processing is single-threaded and synchronous; later
//! finalize steps depend on state buffered during the scan, so detections
//! are never processed out of order.

use crate::core::config::ExtractorConfig;
use crate::core::errors::PosterResult;
use crate::domain::report::{ContrastReport, FontSizeReport, LogoEntry, LogoEvaluation, Report};
use crate::evaluators::color_contrast::ColorContrastEvaluator;
use crate::evaluators::font_size::FontSizeEvaluator;
use crate::models::{DetectorLabel, ModelSet};
use crate::pipeline::artifacts::ArtifactStore;
use crate::pipeline::context::RequestContext;
use crate::pipeline::dispatch::{DetectedRegion, dispatch_region};
use crate::pipeline::finalize;
use crate::pipeline::scan::ScanBuffers;
use crate::processors::crop::crop_region;
use crate::utils::image::load_image;
use crate::utils::visualization::LabelStyle;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extracts labeled components from poster images and evaluates their
/// accessibility.
///
/// The extractor itself holds only shared read-only model handles and
/// configuration; every call to [`extract_components`] builds its own
/// request-scoped state. Concurrent requests must use distinct artifact
/// roots, since artifacts are flat files.
///
/// [`extract_components`]: PosterComponentExtractor::extract_components
#[derive(Debug)]
pub struct PosterComponentExtractor {
    models: ModelSet,
    config: ExtractorConfig,
    artifact_root: PathBuf,
}

impl PosterComponentExtractor {
    /// Creates an extractor with the given model handles and configuration.
    ///
    /// Model handles are constructed once at process start and passed in by
    /// shared reference; they are never reloaded per request.
    pub fn new(
        models: ModelSet,
        config: ExtractorConfig,
        artifact_root: impl Into<PathBuf>,
    ) -> PosterResult<Self> {
        config.validate()?;
        Ok(Self {
            models,
            config,
            artifact_root: artifact_root.into(),
        })
    }

    /// Runs one full extraction over the poster at `poster_path`.
    ///
    /// Fails with a decode error when the source image cannot be read;
    /// every other failure is isolated to the affected region. The returned
    /// [`PosterExtraction`] carries the assembled findings.
    pub fn extract_components(
        &self,
        poster_path: impl AsRef<Path>,
    ) -> PosterResult<PosterExtraction> {
        let poster_path = poster_path.as_ref();
        let original = load_image(poster_path)?;
        info!(
            "extracting components from {} ({}x{})",
            poster_path.display(),
            original.width(),
            original.height()
        );

        let mut ctx = RequestContext {
            config: &self.config,
            models: &self.models,
            original: &original,
            artifacts: ArtifactStore::new(&self.artifact_root)?,
            overlay: original.clone(),
            logo_overlay: None,
            contrast: ColorContrastEvaluator::new(&original, self.config.contrast.clone()),
            style: LabelStyle::with_system_font(),
        };

        // Scan phase: one pass over detector output, in emission order.
        let detections = self.models.layout.detect(
            &original,
            self.config.inference_size,
            self.config.confidence_threshold,
        )?;
        debug!("layout detector returned {} detections", detections.len());

        let mut buffers = ScanBuffers::new();
        for (component_id, detection) in detections.iter().enumerate() {
            let Some(bbox) = detection
                .bbox
                .clamp_to(original.width(), original.height())
            else {
                warn!("detection {component_id} lies outside the image, skipped");
                continue;
            };
            let crop = match crop_region(&original, &bbox) {
                Ok(crop) => crop,
                Err(e) => {
                    warn!("detection {component_id} could not be cropped: {e}");
                    continue;
                }
            };

            let label = DetectorLabel::from_index(detection.label_index);
            dispatch_region(
                &mut ctx,
                &mut buffers,
                component_id,
                label,
                DetectedRegion { bbox, crop },
            )?;
        }

        // Finalize phase: whole-poster title/author resolution over the
        // buffered candidates.
        let resolved = finalize::resolve(&mut ctx, buffers)?;
        if let Some(title) = &resolved.title {
            debug!("resolved title at ({:.0}, {:.0})", title.x1, title.y1);
        }
        if let Some(author) = &resolved.author {
            debug!("resolved author block '{}'", author.text);
        }
        let logos = resolved.logos;

        let poster_layout = ctx.artifacts.save_layout_overlay(&ctx.overlay)?;
        ctx.contrast.save_result(&ctx.artifacts)?;

        let mut logo_evaluation = None;
        if !logos.is_empty()
            && let Some(overlay) = ctx.logo_overlay.as_ref()
        {
            let summary = ctx.artifacts.save_logos_overlay(overlay)?;
            logo_evaluation = Some(LogoEvaluation {
                logo_evaluation_summary: summary,
                logos: logos
                    .iter()
                    .map(|logo| LogoEntry {
                        label: logo.style.as_str().to_string(),
                        image: logo.image.clone(),
                    })
                    .collect(),
            });
        }

        let RequestContext {
            artifacts, contrast, ..
        } = ctx;
        let color_contrast = contrast.into_report(&artifacts)?;
        let font_size = FontSizeEvaluator::new(
            self.models.ocr.as_ref(),
            self.config.min_word_confidence,
        )
        .evaluate(&artifacts);

        Ok(PosterExtraction {
            poster_layout,
            logo_evaluation,
            color_contrast,
            font_size,
            artifacts,
        })
    }
}

/// The completed outcome of one extraction request.
///
/// Immutable once assembled; [`report`](PosterExtraction::report) returns
/// the terminal aggregate.
#[derive(Debug)]
pub struct PosterExtraction {
    poster_layout: String,
    logo_evaluation: Option<LogoEvaluation>,
    color_contrast: Option<ContrastReport>,
    font_size: Option<FontSizeReport>,
    artifacts: ArtifactStore,
}

impl PosterExtraction {
    /// Assembles the final report, omitting features with no findings.
    pub fn report(&self) -> Report {
        Report {
            poster_layout: self.poster_layout.clone(),
            logo_evaluation: self.logo_evaluation.clone(),
            color_contrast: self.color_contrast.clone(),
            font_size: self.font_size.clone(),
        }
    }

    /// The artifact store of this request.
    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }
}
