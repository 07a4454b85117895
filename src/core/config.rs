//! Configuration for the poster extraction pipeline.
//!
//! All calibration constants live here with the production values as
//! defaults. The area threshold for logo/diagram reclassification and the
//! author distance cutoff have no documented derivation; they are kept
//! configurable but should not be changed without new calibration data.

use crate::core::errors::{PosterError, PosterResult};
use crate::domain::region::ComponentKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the poster component extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Inference resolution passed to the layout detector (default: 1024).
    pub inference_size: u32,
    /// Minimum detection confidence (default: 0.2).
    pub confidence_threshold: f32,
    /// Logo-classified figures with at least this bbox area in square pixels
    /// are reclassified as diagrams (default: 34000.0).
    pub logo_area_threshold: f32,
    /// An author candidate is promoted only when its center lies strictly
    /// closer than this many pixels to the title center (default: 300.0).
    pub author_distance_cutoff: f32,
    /// Plain-text regions with at least this many OCR words are never
    /// author blocks (default: 25).
    pub author_word_limit: usize,
    /// Minimum OCR word confidence for font-size measurement (default: 60.0).
    pub min_word_confidence: f32,
    /// Color contrast evaluation settings.
    pub contrast: ContrastConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            inference_size: 1024,
            confidence_threshold: 0.2,
            logo_area_threshold: 34000.0,
            author_distance_cutoff: 300.0,
            author_word_limit: 25,
            min_word_confidence: 60.0,
            contrast: ContrastConfig::default(),
        }
    }
}

impl ExtractorConfig {
    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> PosterResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| PosterError::config_error("extractor config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all fields, returning a configuration error on the first
    /// out-of-range value.
    pub fn validate(&self) -> PosterResult<()> {
        if self.inference_size == 0 {
            return Err(PosterError::config_error(
                "inference_size",
                "must be greater than zero",
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(PosterError::config_error(
                "confidence_threshold",
                format!("expected 0.0..=1.0, got {}", self.confidence_threshold),
            ));
        }
        if self.logo_area_threshold < 0.0 {
            return Err(PosterError::config_error(
                "logo_area_threshold",
                "must not be negative",
            ));
        }
        if self.author_distance_cutoff < 0.0 {
            return Err(PosterError::config_error(
                "author_distance_cutoff",
                "must not be negative",
            ));
        }
        if self.author_word_limit == 0 {
            return Err(PosterError::config_error(
                "author_word_limit",
                "must be greater than zero",
            ));
        }
        self.contrast.validate()
    }
}

/// Configuration for color contrast evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContrastConfig {
    /// Per-kind WCAG contrast thresholds.
    pub thresholds: ContrastThresholds,
    /// Width of the border band, in pixels, voted on to pick the background
    /// cluster (default: 10).
    pub border_band: u32,
    /// Pixel clustering parameters.
    pub clustering: ClusterConfig,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            thresholds: ContrastThresholds::default(),
            border_band: 10,
            clustering: ClusterConfig::default(),
        }
    }
}

impl ContrastConfig {
    /// Validates the contrast settings.
    pub fn validate(&self) -> PosterResult<()> {
        if self.border_band == 0 {
            return Err(PosterError::config_error(
                "border_band",
                "must be greater than zero",
            ));
        }
        self.thresholds.validate()?;
        self.clustering.validate()
    }
}

/// WCAG contrast-ratio thresholds per component kind.
///
/// Body-sized text kinds use the large-text threshold (3.0); title-sized
/// kinds use the normal-text threshold (4.5). Kinds without an entry use
/// `default`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContrastThresholds {
    /// Threshold for `plain_text` regions.
    pub plain_text: f64,
    /// Threshold for `caption` regions.
    pub caption: f64,
    /// Threshold for `title` regions.
    pub title: f64,
    /// Threshold for `authors` regions.
    pub authors: f64,
    /// Threshold for `heading` regions.
    pub heading: f64,
    /// Threshold for every other kind.
    pub default: f64,
}

impl Default for ContrastThresholds {
    fn default() -> Self {
        Self {
            plain_text: 3.0,
            caption: 3.0,
            title: 4.5,
            authors: 4.5,
            heading: 4.5,
            default: 4.5,
        }
    }
}

impl ContrastThresholds {
    /// Returns the threshold for the given component kind.
    pub fn threshold_for(&self, kind: ComponentKind) -> f64 {
        match kind {
            ComponentKind::PlainText => self.plain_text,
            ComponentKind::Caption => self.caption,
            ComponentKind::Title => self.title,
            ComponentKind::Authors => self.authors,
            ComponentKind::Heading => self.heading,
            _ => self.default,
        }
    }

    fn validate(&self) -> PosterResult<()> {
        for (name, value) in [
            ("plain_text", self.plain_text),
            ("caption", self.caption),
            ("title", self.title),
            ("authors", self.authors),
            ("heading", self.heading),
            ("default", self.default),
        ] {
            // Valid WCAG contrast ratios span 1:1 to 21:1.
            if !(1.0..=21.0).contains(&value) {
                return Err(PosterError::config_error(
                    "contrast threshold",
                    format!("'{name}' expected 1.0..=21.0, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Parameters for the k=2 pixel clustering step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Maximum iterations per restart (default: 200).
    pub max_iterations: usize,
    /// Convergence epsilon on center movement (default: 0.1).
    pub epsilon: f32,
    /// Number of randomized restarts; the lowest-inertia run wins
    /// (default: 10).
    pub restarts: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            epsilon: 0.1,
            restarts: 10,
        }
    }
}

impl ClusterConfig {
    fn validate(&self) -> PosterResult<()> {
        if self.max_iterations == 0 {
            return Err(PosterError::config_error(
                "clustering.max_iterations",
                "must be greater than zero",
            ));
        }
        if self.epsilon <= 0.0 {
            return Err(PosterError::config_error(
                "clustering.epsilon",
                "must be positive",
            ));
        }
        if self.restarts == 0 {
            return Err(PosterError::config_error(
                "clustering.restarts",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
