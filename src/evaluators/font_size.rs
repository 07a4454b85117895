//! Font size measurement for text-bearing components.
//!
//! Re-reads the persisted crops of text-bearing components, extracts
//! word-level boxes through the OCR collaborator, and reports the average,
//! minimum, and maximum box height of confidently recognized words. A
//! component with no confident words is omitted; OCR failures are logged and
//! never fatal.

use crate::domain::report::{FontSizeEntry, FontSizeReport};
use crate::models::OcrEngine;
use crate::pipeline::artifacts::ArtifactStore;
use crate::utils::image::load_image;
use std::collections::BTreeMap;
use tracing::warn;

/// Measures font sizes over the persisted text components of one request.
pub struct FontSizeEvaluator<'a> {
    ocr: &'a dyn OcrEngine,
    min_confidence: f32,
}

impl<'a> FontSizeEvaluator<'a> {
    /// Creates an evaluator keeping word boxes with confidence strictly
    /// above `min_confidence`.
    pub fn new(ocr: &'a dyn OcrEngine, min_confidence: f32) -> Self {
        Self {
            ocr,
            min_confidence,
        }
    }

    /// Evaluates every text-bearing component persisted in the store.
    ///
    /// Returns `None` when no component yielded confident words.
    pub fn evaluate(&self, artifacts: &ArtifactStore) -> Option<FontSizeReport> {
        let mut components = BTreeMap::new();

        for saved in artifacts.saved_components() {
            if !saved.kind.is_text_bearing() {
                continue;
            }

            let crop = match load_image(&saved.path) {
                Ok(crop) => crop,
                Err(e) => {
                    warn!("skipping font measurement for {}: {e}", saved.stem);
                    continue;
                }
            };

            let word_boxes = match self.ocr.extract_word_boxes(&crop) {
                Ok(boxes) => boxes,
                Err(e) => {
                    warn!("word box extraction failed for {}: {e}", saved.stem);
                    continue;
                }
            };

            let heights: Vec<f64> = word_boxes
                .iter()
                .filter(|word| {
                    word.confidence > self.min_confidence
                        && !word.text.trim().is_empty()
                        && word.bbox.height() > 0.0
                })
                .map(|word| word.bbox.height() as f64)
                .collect();

            if heights.is_empty() {
                continue;
            }

            let sum: f64 = heights.iter().sum();
            let average = sum / heights.len() as f64;
            let min_size = heights.iter().cloned().fold(f64::INFINITY, f64::min);
            let max_size = heights.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

            components.insert(
                saved.stem.clone(),
                FontSizeEntry {
                    font_size: (average * 100.0).round() / 100.0,
                    min_size,
                    max_size,
                    text_count: heights.len(),
                    img: saved.url.clone(),
                    kind: saved.kind,
                },
            );
        }

        if components.is_empty() {
            None
        } else {
            Some(FontSizeReport { components })
        }
    }
}
