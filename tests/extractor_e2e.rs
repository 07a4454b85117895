//! End-to-end extraction scenarios with mock collaborators.
//!
//! These tests drive the public API against synthetic posters written to a
//! temp directory and scripted model responses, asserting label and
//! threshold outcomes rather than exact color triples (the clustering step
//! is randomly seeded).

use image::{Rgb, RgbImage};
use poster_access::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

// Detector label indices for the scripted detections.
const TITLE_INDEX: usize = 0;
const PLAIN_TEXT_INDEX: usize = 1;
const FIGURE_INDEX: usize = 3;

struct ScriptedDetector(Vec<LayoutDetection>);

impl LayoutDetector for ScriptedDetector {
    fn detect(
        &self,
        _image: &RgbImage,
        _inference_size: u32,
        _confidence_threshold: f32,
    ) -> PosterResult<Vec<LayoutDetection>> {
        Ok(self.0.clone())
    }
}

struct FixedClassifier(&'static str);

impl ImageClassifier for FixedClassifier {
    fn classify(&self, _crop: &RgbImage) -> PosterResult<Classification> {
        Ok(Classification::new(self.0, 0.92))
    }
}

struct ScriptedOcr {
    text: &'static str,
}

impl OcrEngine for ScriptedOcr {
    fn extract_text(&self, _image: &RgbImage) -> PosterResult<String> {
        Ok(self.text.to_string())
    }

    fn extract_word_boxes(&self, _image: &RgbImage) -> PosterResult<Vec<WordBox>> {
        Ok(vec![
            WordBox {
                text: "Jane".to_string(),
                bbox: BoundingBox::from_coords(0.0, 0.0, 40.0, 30.0),
                confidence: 91.0,
            },
            WordBox {
                text: "Doe".to_string(),
                bbox: BoundingBox::from_coords(45.0, 0.0, 80.0, 20.0),
                confidence: 88.0,
            },
        ])
    }
}

struct PersonFinder(bool);

impl EntityExtractor for PersonFinder {
    fn entities(&self, _text: &str) -> PosterResult<Vec<Entity>> {
        if self.0 {
            Ok(vec![Entity {
                text: "Jane Doe".to_string(),
                label: "PERSON".to_string(),
            }])
        } else {
            Ok(Vec::new())
        }
    }
}

fn models(
    detections: Vec<LayoutDetection>,
    figure_label: &'static str,
    ocr_text: &'static str,
    finds_person: bool,
) -> ModelSet {
    ModelSet {
        layout: Arc::new(ScriptedDetector(detections)),
        figure_classifier: Arc::new(FixedClassifier(figure_label)),
        logo_classifier: Arc::new(FixedClassifier("Simple")),
        ocr: Arc::new(ScriptedOcr { text: ocr_text }),
        entities: Arc::new(PersonFinder(finds_person)),
    }
}

fn detection(bbox: BoundingBox, label_index: usize) -> LayoutDetection {
    LayoutDetection {
        bbox,
        confidence: 0.8,
        label_index,
    }
}

/// Paints a black "text" block inside the given box so contrast clustering
/// finds two colors with a white border.
fn paint_text_block(poster: &mut RgbImage, x1: u32, y1: u32, x2: u32, y2: u32) {
    for y in y1..y2 {
        for x in x1..x2 {
            poster.put_pixel(x, y, BLACK);
        }
    }
}

fn write_poster(dir: &TempDir, poster: &RgbImage) -> PathBuf {
    let path = dir.path().join("poster.png");
    poster.save(&path).unwrap();
    path
}

/// Two title candidates plus a nearby two-word person block: the larger
/// title wins, the smaller becomes a heading, and the block is buffered as
/// authors rather than plain text.
#[test]
fn title_heading_and_author_resolution() {
    let dir = TempDir::new().unwrap();
    let mut poster = RgbImage::from_pixel(1000, 1000, WHITE);
    // Larger title (area 5000), centered text stripe for contrast.
    paint_text_block(&mut poster, 130, 115, 170, 135);
    // Smaller title (area 2000).
    paint_text_block(&mut poster, 315, 110, 335, 130);
    // Author block 150 px below the larger title's center.
    paint_text_block(&mut poster, 130, 270, 170, 280);
    let poster_path = write_poster(&dir, &poster);

    let detections = vec![
        detection(BoundingBox::from_coords(100.0, 100.0, 200.0, 150.0), TITLE_INDEX),
        detection(BoundingBox::from_coords(300.0, 100.0, 350.0, 140.0), TITLE_INDEX),
        detection(
            BoundingBox::from_coords(100.0, 265.0, 200.0, 285.0),
            PLAIN_TEXT_INDEX,
        ),
    ];

    let extractor = PosterComponentExtractor::new(
        models(detections, "Logo", "Jane Doe", true),
        ExtractorConfig::default(),
        dir.path().join("artifacts"),
    )
    .unwrap();

    let extraction = extractor.extract_components(&poster_path).unwrap();
    let report = extraction.report();

    // The layout overlay is always reported.
    assert_eq!(
        report.poster_layout,
        "get-image/output/extracted_components.png"
    );
    assert!(
        dir.path()
            .join("artifacts/output/extracted_components.png")
            .exists()
    );

    // Contrast sections: authors during scan, then title and heading during
    // finalization. No plain_text entry for the author block.
    let contrast = report.color_contrast.as_ref().unwrap();
    let kinds: Vec<ComponentKind> = contrast.sections.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ComponentKind::Authors,
            ComponentKind::Title,
            ComponentKind::Heading
        ]
    );

    let title_section = &contrast.sections[1];
    assert_eq!(title_section.threshold, 4.5);
    assert_eq!(title_section.accessibility, Accessibility::Pass);

    // Artifacts for the resolved kinds exist; none for plain text.
    let raw = dir.path().join("artifacts/raw_components");
    assert!(raw.join("title_1.jpg").exists());
    assert!(raw.join("heading_1.jpg").exists());
    assert!(raw.join("authors_1.jpg").exists());
    assert!(!raw.join("plain_text_1.jpg").exists());

    // No logos were found, so the key is omitted.
    assert!(report.logo_evaluation.is_none());

    // Word boxes from the OCR collaborator produce font measurements for
    // the text-bearing components.
    let font_size = report.font_size.as_ref().unwrap();
    let entry = font_size.components.get("authors_1").unwrap();
    assert_eq!(entry.text_count, 2);
    assert_eq!(entry.font_size, 25.0);
    assert_eq!(entry.min_size, 20.0);
    assert_eq!(entry.max_size, 30.0);
}

/// Running the same poster twice yields the same labeled-region set and the
/// same pass/fail verdicts, despite randomized clustering seeds.
#[test]
fn extraction_is_idempotent_across_runs() {
    let dir = TempDir::new().unwrap();
    let mut poster = RgbImage::from_pixel(800, 800, WHITE);
    paint_text_block(&mut poster, 130, 115, 170, 135);
    paint_text_block(&mut poster, 130, 270, 170, 280);
    let poster_path = write_poster(&dir, &poster);

    let detections = vec![
        detection(BoundingBox::from_coords(100.0, 100.0, 200.0, 150.0), TITLE_INDEX),
        detection(
            BoundingBox::from_coords(100.0, 265.0, 200.0, 285.0),
            PLAIN_TEXT_INDEX,
        ),
    ];

    let run = |artifact_dir: &str| {
        let extractor = PosterComponentExtractor::new(
            models(detections.clone(), "Logo", "Jane Doe", true),
            ExtractorConfig::default(),
            dir.path().join(artifact_dir),
        )
        .unwrap();
        let extraction = extractor.extract_components(&poster_path).unwrap();
        let report = extraction.report();
        let contrast = report.color_contrast.unwrap();
        contrast
            .sections
            .iter()
            .map(|s| (s.kind, s.accessibility, s.threshold))
            .collect::<Vec<_>>()
    };

    let first = run("artifacts-a");
    let second = run("artifacts-b");
    assert_eq!(first, second);
}

/// A Logo-classified figure of area 40000 is reclassified as a diagram and
/// never reaches the logo report.
#[test]
fn oversized_logo_is_reported_as_diagram() {
    let dir = TempDir::new().unwrap();
    let poster = RgbImage::from_pixel(600, 600, WHITE);
    let poster_path = write_poster(&dir, &poster);

    let detections = vec![detection(
        BoundingBox::from_coords(50.0, 50.0, 250.0, 250.0),
        FIGURE_INDEX,
    )];

    let extractor = PosterComponentExtractor::new(
        models(detections, "Logo", "", false),
        ExtractorConfig::default(),
        dir.path().join("artifacts"),
    )
    .unwrap();

    let extraction = extractor.extract_components(&poster_path).unwrap();
    let report = extraction.report();

    assert!(report.logo_evaluation.is_none());
    assert!(
        dir.path()
            .join("artifacts/raw_components/diagram_1.jpg")
            .exists()
    );
}

/// A small Logo-classified figure goes through the style classifier and is
/// reported with its crop and the logos-only overlay.
#[test]
fn small_logo_is_sub_classified_and_reported() {
    let dir = TempDir::new().unwrap();
    let poster = RgbImage::from_pixel(600, 600, WHITE);
    let poster_path = write_poster(&dir, &poster);

    let detections = vec![detection(
        BoundingBox::from_coords(50.0, 50.0, 150.0, 150.0),
        FIGURE_INDEX,
    )];

    let extractor = PosterComponentExtractor::new(
        models(detections, "Logo", "", false),
        ExtractorConfig::default(),
        dir.path().join("artifacts"),
    )
    .unwrap();

    let extraction = extractor.extract_components(&poster_path).unwrap();
    let report = extraction.report();

    let logos = report.logo_evaluation.as_ref().unwrap();
    assert_eq!(
        logos.logo_evaluation_summary,
        "get-image/output/logos/logos_annotated.png"
    );
    assert_eq!(logos.logos.len(), 1);
    assert_eq!(logos.logos[0].label, "Simple");
    assert_eq!(logos.logos[0].image, "get-image/output/logos/logo_1.png");
    assert!(dir.path().join("artifacts/output/logos/logo_1.png").exists());
    assert!(
        dir.path()
            .join("artifacts/output/logos/logos_annotated.png")
            .exists()
    );
}

/// An unreadable source image aborts the whole extraction with a decode
/// error.
#[test]
fn unreadable_poster_fails_with_decode_error() {
    let dir = TempDir::new().unwrap();
    let extractor = PosterComponentExtractor::new(
        models(Vec::new(), "Logo", "", false),
        ExtractorConfig::default(),
        dir.path().join("artifacts"),
    )
    .unwrap();

    let err = extractor
        .extract_components(dir.path().join("missing.png"))
        .unwrap_err();
    assert!(matches!(err, PosterError::Decode { .. }));
}

/// A poster with no detections still reports the layout overlay, and every
/// optional feature key is omitted.
#[test]
fn empty_poster_reports_layout_only() {
    let dir = TempDir::new().unwrap();
    let poster = RgbImage::from_pixel(300, 300, WHITE);
    let poster_path = write_poster(&dir, &poster);

    let extractor = PosterComponentExtractor::new(
        models(Vec::new(), "Logo", "", false),
        ExtractorConfig::default(),
        dir.path().join("artifacts"),
    )
    .unwrap();

    let extraction = extractor.extract_components(&poster_path).unwrap();
    let value = serde_json::to_value(extraction.report()).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert!(object.contains_key("poster_layout"));
}
