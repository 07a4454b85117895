//! Report types for the poster evaluation pipeline.
//!
//! The report is the terminal aggregate of one extraction request: a mapping
//! from feature name to its structured sub-result. It is assembled once after
//! the finalize passes and is immutable thereafter. Features with no findings
//! are omitted entirely rather than serialized as empty objects.

use crate::domain::region::ComponentKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// The final per-poster report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// URL of the annotated extracted-components overlay.
    pub poster_layout: String,
    /// Logo findings; omitted when no logos were detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_evaluation: Option<LogoEvaluation>,
    /// Color contrast findings; omitted when no sections were evaluated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_contrast: Option<ContrastReport>,
    /// Font size findings; omitted when no text component yielded
    /// confident word boxes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSizeReport>,
}

/// Logo evaluation sub-result.
#[derive(Debug, Clone, Serialize)]
pub struct LogoEvaluation {
    /// URL of the logos-only annotated overlay.
    pub logo_evaluation_summary: String,
    /// One entry per detected logo, in detection order.
    pub logos: Vec<LogoEntry>,
}

/// A single detected logo.
#[derive(Debug, Clone, Serialize)]
pub struct LogoEntry {
    /// Style label from the logo classifier (`Simple` or `Complex`).
    pub label: String,
    /// URL of the persisted logo crop.
    pub image: String,
}

/// Color contrast sub-result.
#[derive(Debug, Clone, Serialize)]
pub struct ContrastReport {
    /// Evaluated sections in request order; never re-ordered or deduplicated.
    pub sections: Vec<ContrastSection>,
    /// URL of the annotated contrast overlay.
    pub color_contrast_summary: String,
}

/// One evaluated contrast section.
#[derive(Debug, Clone, Serialize)]
pub struct ContrastSection {
    /// 1-based section id in evaluation order.
    pub section_id: usize,
    /// URL of the persisted section crop.
    pub section_image: String,
    /// Dominant text color as RGB.
    pub text_color: [u8; 3],
    /// Dominant background color as RGB.
    pub background_color: [u8; 3],
    /// WCAG contrast ratio between text and background.
    pub contrast_ratio: f64,
    /// PASS when the ratio meets the per-kind threshold.
    pub accessibility: Accessibility,
    /// The component kind the section was evaluated under.
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// The threshold the ratio was compared against.
    pub threshold: f64,
}

/// Pass/fail verdict for an accessibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Accessibility {
    /// The check met its threshold.
    #[serde(rename = "PASS")]
    Pass,
    /// The check fell short of its threshold.
    #[serde(rename = "FAIL")]
    Fail,
}

impl Accessibility {
    /// Builds a verdict from a boolean pass flag.
    pub fn from_pass(passed: bool) -> Self {
        if passed {
            Accessibility::Pass
        } else {
            Accessibility::Fail
        }
    }
}

/// Font size sub-result: one entry per text-bearing component artifact,
/// keyed by the artifact stem (for example `plain_text_2`).
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct FontSizeReport {
    /// Measurements per component stem, in stable (sorted) order.
    pub components: BTreeMap<String, FontSizeEntry>,
}

/// Font size measurements for one component crop.
#[derive(Debug, Clone, Serialize)]
pub struct FontSizeEntry {
    /// Average confident word-box height, in pixels, rounded to 2 decimals.
    pub font_size: f64,
    /// Smallest confident word-box height.
    pub min_size: f64,
    /// Largest confident word-box height.
    pub max_size: f64,
    /// Number of confident words measured.
    pub text_count: usize,
    /// URL of the measured component crop.
    pub img: String,
    /// The component kind of the crop.
    #[serde(rename = "type")]
    pub kind: ComponentKind,
}
