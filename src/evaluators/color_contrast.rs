//! WCAG color contrast evaluation.
//!
//! Each evaluated section contributes one entry to the accumulated results
//! and one pass/fail box to a shared annotated copy of the poster. Results
//! are kept in request order and never deduplicated.

use crate::core::config::ContrastConfig;
use crate::core::errors::{PosterError, PosterResult};
use crate::domain::region::ComponentKind;
use crate::domain::report::{Accessibility, ContrastReport, ContrastSection};
use crate::pipeline::artifacts::ArtifactStore;
use crate::processors::color_cluster::dominant_colors;
use crate::processors::geometry::BoundingBox;
use crate::utils::visualization::{LabelStyle, draw_labeled_box};
use image::{Rgb, RgbImage};

const PASS_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const FAIL_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// WCAG relative luminance of an sRGB color.
///
/// Channels use the standard piecewise gamma curve: linear below 0.03928,
/// `((c + 0.055) / 1.055)^2.4` above.
pub fn relative_luminance(color: Rgb<u8>) -> f64 {
    fn channel(value: u8) -> f64 {
        let c = value as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel(color.0[0]) + 0.7152 * channel(color.0[1]) + 0.0722 * channel(color.0[2])
}

/// WCAG contrast ratio between two colors, in `[1, 21]`.
///
/// Symmetric in its arguments: the brighter color is always the numerator.
pub fn contrast_ratio(a: Rgb<u8>, b: Rgb<u8>) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}

/// One evaluated section, accumulated in request order.
#[derive(Debug, Clone)]
pub struct SectionEvaluation {
    /// The crop that was evaluated.
    pub crop: RgbImage,
    /// Dominant text color.
    pub text_color: Rgb<u8>,
    /// Dominant background color.
    pub background_color: Rgb<u8>,
    /// WCAG contrast ratio.
    pub contrast_ratio: f64,
    /// The per-kind threshold the ratio was compared against.
    pub threshold: f64,
    /// Whether the ratio met the threshold.
    pub passed: bool,
    /// The kind the section was evaluated under.
    pub kind: ComponentKind,
}

/// Accumulates per-section contrast verdicts and the annotated overlay for
/// one extraction request.
pub struct ColorContrastEvaluator {
    overlay: RgbImage,
    config: ContrastConfig,
    sections: Vec<SectionEvaluation>,
}

impl ColorContrastEvaluator {
    /// Creates an evaluator drawing onto a copy of the original poster.
    pub fn new(original: &RgbImage, config: ContrastConfig) -> Self {
        Self {
            overlay: original.clone(),
            config,
            sections: Vec::new(),
        }
    }

    /// Evaluates one region crop under the given kind.
    ///
    /// Fails fast with an invalid-region error when the crop is empty or
    /// zero-area; that failure is fatal to the region only and must not
    /// abort the poster.
    pub fn evaluate_section(
        &mut self,
        kind: ComponentKind,
        bbox: &BoundingBox,
        crop: &RgbImage,
        style: &LabelStyle,
    ) -> PosterResult<()> {
        if crop.width() == 0 || crop.height() == 0 {
            return Err(PosterError::invalid_region(format!(
                "empty crop for contrast evaluation of {kind}"
            )));
        }

        let colors = dominant_colors(crop, &self.config.clustering, self.config.border_band)?;
        let ratio = contrast_ratio(colors.text, colors.background);
        let threshold = self.config.thresholds.threshold_for(kind);
        let passed = ratio >= threshold;

        let color = if passed { PASS_COLOR } else { FAIL_COLOR };
        let label = format!("Section {}", self.sections.len() + 1);
        draw_labeled_box(&mut self.overlay, bbox, color, Some(&label), style);

        self.sections.push(SectionEvaluation {
            crop: crop.clone(),
            text_color: colors.text,
            background_color: colors.background,
            contrast_ratio: ratio,
            threshold,
            passed,
            kind,
        });

        Ok(())
    }

    /// Returns true when at least one section was evaluated.
    pub fn has_sections(&self) -> bool {
        !self.sections.is_empty()
    }

    /// The accumulated evaluations, in request order.
    pub fn sections(&self) -> &[SectionEvaluation] {
        &self.sections
    }

    /// Persists the annotated contrast overlay and returns its URL.
    pub fn save_result(&self, artifacts: &ArtifactStore) -> PosterResult<String> {
        artifacts.save_contrast_overlay(&self.overlay)
    }

    /// Persists the per-section crops and assembles the contrast report.
    ///
    /// Returns `None` when no sections were evaluated.
    pub fn into_report(self, artifacts: &ArtifactStore) -> PosterResult<Option<ContrastReport>> {
        if self.sections.is_empty() {
            return Ok(None);
        }

        let mut sections = Vec::with_capacity(self.sections.len());
        for (idx, section) in self.sections.iter().enumerate() {
            let section_id = idx + 1;
            let section_image = artifacts.save_contrast_section(section_id, &section.crop)?;
            sections.push(ContrastSection {
                section_id,
                section_image,
                text_color: section.text_color.0,
                background_color: section.background_color.0,
                contrast_ratio: section.contrast_ratio,
                accessibility: Accessibility::from_pass(section.passed),
                kind: section.kind,
                threshold: section.threshold,
            });
        }

        Ok(Some(ContrastReport {
            sections,
            color_contrast_summary: artifacts.contrast_overlay_url(),
        }))
    }
}
