//! Model collaborator interfaces.
//!
//! The pipeline never runs inference itself. The layout detector, the two
//! sub-classifiers, OCR, and named-entity extraction are external
//! collaborators behind the narrow traits defined here. Handles are
//! constructed once at process start and injected by shared reference into
//! each extraction request; implementations must be safe to share across
//! requests as read-only resources.

use crate::core::errors::PosterResult;
use crate::processors::geometry::BoundingBox;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The entity label the author-likeness heuristic looks for.
pub const PERSON_ENTITY_LABEL: &str = "PERSON";

/// One raw detection row from the layout model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDetection {
    /// Detected bounding box in original-image pixel space.
    pub bbox: BoundingBox,
    /// Detection confidence in `[0, 1]`.
    pub confidence: f32,
    /// Index into the detector's label vocabulary.
    pub label_index: usize,
}

/// A classification result from a sub-model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// The predicted label string, in the classifier's own vocabulary.
    pub label: String,
    /// Confidence score of the prediction in `[0, 1]`.
    pub score: f32,
}

impl Classification {
    /// Creates a classification result.
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// One word-level OCR box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordBox {
    /// The recognized word.
    pub text: String,
    /// Bounding box of the word within the OCR'd image.
    pub bbox: BoundingBox,
    /// Recognition confidence, on the OCR engine's own scale (0-100 for
    /// Tesseract-style engines).
    pub confidence: f32,
}

/// A named entity found in a piece of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// The matched text span.
    pub text: String,
    /// The entity label (for example `PERSON`).
    pub label: String,
}

impl Entity {
    /// Returns true when this entity names a person.
    pub fn is_person(&self) -> bool {
        self.label == PERSON_ENTITY_LABEL
    }
}

/// A layout detection model producing labeled boxes for a poster image.
pub trait LayoutDetector: Send + Sync {
    /// Runs detection on `image` at the given inference resolution, keeping
    /// detections at or above `confidence_threshold`, in the model's
    /// emission order.
    fn detect(
        &self,
        image: &RgbImage,
        inference_size: u32,
        confidence_threshold: f32,
    ) -> PosterResult<Vec<LayoutDetection>>;
}

/// A single-label image classifier.
///
/// Used for both the figure-type classifier (5-way) and the logo-style
/// classifier (binary).
pub trait ImageClassifier: Send + Sync {
    /// Classifies the given crop, returning the top label and its score.
    fn classify(&self, crop: &RgbImage) -> PosterResult<Classification>;
}

/// An OCR service.
pub trait OcrEngine: Send + Sync {
    /// Extracts the plain text of an image.
    fn extract_text(&self, image: &RgbImage) -> PosterResult<String>;

    /// Extracts word-level boxes with confidences.
    fn extract_word_boxes(&self, image: &RgbImage) -> PosterResult<Vec<WordBox>>;
}

/// A named-entity extractor.
pub trait EntityExtractor: Send + Sync {
    /// Returns the entities found in `text`.
    fn entities(&self, text: &str) -> PosterResult<Vec<Entity>>;
}

/// The shared, read-only model handles one extraction request needs.
///
/// Construct the handles once at process start and clone the set (cheap Arc
/// clones) for each extractor.
#[derive(Clone)]
pub struct ModelSet {
    /// The layout detection model.
    pub layout: Arc<dyn LayoutDetector>,
    /// The 5-way figure-type classifier.
    pub figure_classifier: Arc<dyn ImageClassifier>,
    /// The binary logo-style classifier.
    pub logo_classifier: Arc<dyn ImageClassifier>,
    /// The OCR service.
    pub ocr: Arc<dyn OcrEngine>,
    /// The named-entity extractor.
    pub entities: Arc<dyn EntityExtractor>,
}

impl std::fmt::Debug for ModelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSet").finish_non_exhaustive()
    }
}

/// The closed label vocabulary of the layout detection model.
///
/// Indices follow the DocLayout-YOLO class table. Unknown indices are not an
/// error: they dispatch to the no-op unknown handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorLabel {
    /// A title or heading block.
    Title,
    /// A body text block.
    PlainText,
    /// A discarded/abandoned block; treated like a figure.
    Abandon,
    /// A figure.
    Figure,
    /// A figure caption.
    FigureCaption,
    /// A table.
    Table,
    /// A table caption.
    TableCaption,
    /// A table footnote.
    TableFootnote,
    /// An isolated formula. No dedicated handler.
    IsolateFormula,
    /// A formula caption. No dedicated handler.
    FormulaCaption,
}

impl DetectorLabel {
    /// Decodes a detector label index, returning `None` for out-of-range
    /// indices.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(DetectorLabel::Title),
            1 => Some(DetectorLabel::PlainText),
            2 => Some(DetectorLabel::Abandon),
            3 => Some(DetectorLabel::Figure),
            4 => Some(DetectorLabel::FigureCaption),
            5 => Some(DetectorLabel::Table),
            6 => Some(DetectorLabel::TableCaption),
            7 => Some(DetectorLabel::TableFootnote),
            8 => Some(DetectorLabel::IsolateFormula),
            9 => Some(DetectorLabel::FormulaCaption),
            _ => None,
        }
    }
}

/// The figure-type classifier's label vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureClass {
    /// A logo.
    Logo,
    /// A table rendered as an image.
    Table,
    /// A pie chart.
    PieChart,
    /// A bar graph.
    BarGraphs,
    /// A line graph.
    LineGraph,
    /// Anything else; resolved to a diagram.
    Other,
}

impl FigureClass {
    /// Parses a figure classifier label. Unrecognized labels map to
    /// [`FigureClass::Other`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "Logo" => FigureClass::Logo,
            "Table" => FigureClass::Table,
            "Pie Chart" => FigureClass::PieChart,
            "Bar Graphs" => FigureClass::BarGraphs,
            "Line graph" => FigureClass::LineGraph,
            _ => FigureClass::Other,
        }
    }
}

/// The logo-style classifier's label vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoStyle {
    /// A simple logo; annotated green.
    Simple,
    /// A complex logo; annotated red.
    Complex,
}

impl LogoStyle {
    /// Parses a logo classifier label. Anything but `Simple` is complex.
    pub fn from_label(label: &str) -> Self {
        if label == "Simple" {
            LogoStyle::Simple
        } else {
            LogoStyle::Complex
        }
    }

    /// The label string recorded in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogoStyle::Simple => "Simple",
            LogoStyle::Complex => "Complex",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_label_vocabulary() {
        assert_eq!(DetectorLabel::from_index(0), Some(DetectorLabel::Title));
        assert_eq!(DetectorLabel::from_index(1), Some(DetectorLabel::PlainText));
        assert_eq!(DetectorLabel::from_index(3), Some(DetectorLabel::Figure));
        assert_eq!(
            DetectorLabel::from_index(7),
            Some(DetectorLabel::TableFootnote)
        );
        assert_eq!(DetectorLabel::from_index(10), None);
    }

    #[test]
    fn test_figure_class_parsing() {
        assert_eq!(FigureClass::from_label("Logo"), FigureClass::Logo);
        assert_eq!(FigureClass::from_label("Pie Chart"), FigureClass::PieChart);
        assert_eq!(FigureClass::from_label("Line graph"), FigureClass::LineGraph);
        assert_eq!(FigureClass::from_label("Flowchart"), FigureClass::Other);
    }

    #[test]
    fn test_logo_style_parsing() {
        assert_eq!(LogoStyle::from_label("Simple"), LogoStyle::Simple);
        assert_eq!(LogoStyle::from_label("Complex"), LogoStyle::Complex);
        assert_eq!(LogoStyle::from_label("anything"), LogoStyle::Complex);
    }

    #[test]
    fn test_person_entity() {
        let person = Entity {
            text: "Ada Lovelace".to_string(),
            label: "PERSON".to_string(),
        };
        let org = Entity {
            text: "MIT".to_string(),
            label: "ORG".to_string(),
        };
        assert!(person.is_person());
        assert!(!org.is_person());
    }
}
