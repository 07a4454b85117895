//! Per-region handler dispatch.
//!
//! Every detector row is routed through exactly one handler selected by an
//! exhaustive match over the detector label vocabulary. Each handler
//! persists its artifact exactly once and appends exactly one entry to the
//! annotated overlay. Sub-model failures degrade to the diagram/unknown
//! branch and are never fatal; OCR/NLP failures degrade to "not an author
//! block".

use crate::core::errors::PosterResult;
use crate::domain::region::{ComponentKind, Region};
use crate::models::{DetectorLabel, FigureClass, LogoStyle};
use crate::pipeline::artifacts::SavedComponent;
use crate::pipeline::context::RequestContext;
use crate::pipeline::scan::{AuthorCandidate, LogoInfo, ScanBuffers, TitleCandidate};
use crate::processors::geometry::BoundingBox;
use crate::utils::visualization::draw_labeled_box;
use image::{Rgb, RgbImage};
use tracing::{debug, warn};

pub(crate) const AUTHORS_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const PLAIN_TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
const TITLE_CANDIDATE_COLOR: Rgb<u8> = Rgb([255, 255, 0]);
const DIAGRAM_COLOR: Rgb<u8> = Rgb([0, 255, 255]);
const FIGURE_TABLE_COLOR: Rgb<u8> = Rgb([255, 255, 0]);
const CHART_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const TABLE_COLOR: Rgb<u8> = Rgb([255, 0, 255]);
const CAPTION_COLOR: Rgb<u8> = Rgb([128, 128, 0]);
const UNKNOWN_COLOR: Rgb<u8> = Rgb([128, 128, 128]);
const SIMPLE_LOGO_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const COMPLEX_LOGO_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// One clamped, cropped detector row awaiting classification.
#[derive(Debug, Clone)]
pub(crate) struct DetectedRegion {
    /// Bounding box in original-image pixel space.
    pub bbox: BoundingBox,
    /// The cropped raster for the box.
    pub crop: RgbImage,
}

/// Routes one detection to its handler.
///
/// Unmapped label indices and formula labels take the no-op unknown path,
/// which only annotates the overlay.
pub(crate) fn dispatch_region(
    ctx: &mut RequestContext<'_>,
    buffers: &mut ScanBuffers,
    component_id: usize,
    label: Option<DetectorLabel>,
    detected: DetectedRegion,
) -> PosterResult<()> {
    match label {
        Some(DetectorLabel::PlainText) => handle_plain_text(ctx, buffers, component_id, detected),
        Some(DetectorLabel::Title) => handle_title(ctx, buffers, component_id, detected),
        Some(DetectorLabel::Figure) | Some(DetectorLabel::Abandon) => {
            handle_figure(ctx, buffers, component_id, detected)
        }
        Some(DetectorLabel::Table) => handle_table(ctx, detected),
        Some(DetectorLabel::TableCaption)
        | Some(DetectorLabel::TableFootnote)
        | Some(DetectorLabel::FigureCaption) => handle_caption(ctx, detected),
        Some(DetectorLabel::IsolateFormula) | Some(DetectorLabel::FormulaCaption) | None => {
            handle_unknown(ctx, detected);
            Ok(())
        }
    }
}

/// Persists a classified region, isolating invariant violations to the
/// region itself. IO failures still propagate.
fn persist(
    ctx: &mut RequestContext<'_>,
    kind: ComponentKind,
    detected: &DetectedRegion,
) -> PosterResult<Option<SavedComponent>> {
    let region = match Region::new(kind, detected.bbox, detected.crop.clone()) {
        Ok(region) => region,
        Err(e) => {
            warn!("skipping {kind} region: {e}");
            return Ok(None);
        }
    };
    ctx.artifacts.save_region(&region).map(Some)
}

/// Plain text either becomes an author candidate or stays body text.
fn handle_plain_text(
    ctx: &mut RequestContext<'_>,
    buffers: &mut ScanBuffers,
    component_id: usize,
    detected: DetectedRegion,
) -> PosterResult<()> {
    ctx.artifacts
        .save_buffer_crop(component_id, "plain_text", &detected.crop)?;

    if let Some(text) = author_text(ctx, &detected.crop) {
        if persist(ctx, ComponentKind::Authors, &detected)?.is_some() {
            draw_labeled_box(
                &mut ctx.overlay,
                &detected.bbox,
                AUTHORS_COLOR,
                Some("Authors"),
                &ctx.style,
            );
            ctx.evaluate_contrast(ComponentKind::Authors, &detected.bbox, &detected.crop);
            buffers.authors.push(AuthorCandidate {
                bbox: detected.bbox,
                text,
            });
        }
    } else if persist(ctx, ComponentKind::PlainText, &detected)?.is_some() {
        draw_labeled_box(
            &mut ctx.overlay,
            &detected.bbox,
            PLAIN_TEXT_COLOR,
            Some("Plain Text"),
            &ctx.style,
        );
        ctx.evaluate_contrast(ComponentKind::PlainText, &detected.bbox, &detected.crop);
    }

    Ok(())
}

/// The author-likeness heuristic.
///
/// OCRs the crop; a block with `author_word_limit` or more words is never an
/// author block, a shorter block is one when the entity extractor finds at
/// least one person. Fails open to "not an author block" on any OCR or NLP
/// error.
fn author_text(ctx: &RequestContext<'_>, crop: &RgbImage) -> Option<String> {
    let text = match ctx.models.ocr.extract_text(crop) {
        Ok(text) => text,
        Err(e) => {
            warn!("author OCR failed, treating as plain text: {e}");
            return None;
        }
    };

    let word_count = text.split_whitespace().count();
    if word_count >= ctx.config.author_word_limit {
        return None;
    }

    match ctx.models.entities.entities(&text) {
        Ok(entities) if entities.iter().any(|entity| entity.is_person()) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Ok(_) => None,
        Err(e) => {
            warn!("author entity pass failed, treating as plain text: {e}");
            None
        }
    }
}

/// Titles are buffered only; resolution happens in the finalize pass.
fn handle_title(
    ctx: &mut RequestContext<'_>,
    buffers: &mut ScanBuffers,
    component_id: usize,
    detected: DetectedRegion,
) -> PosterResult<()> {
    ctx.artifacts
        .save_buffer_crop(component_id, "title", &detected.crop)?;

    buffers.titles.push(TitleCandidate {
        component_id,
        bbox: detected.bbox,
        area: detected.bbox.area(),
    });
    draw_labeled_box(
        &mut ctx.overlay,
        &detected.bbox,
        TITLE_CANDIDATE_COLOR,
        None,
        &ctx.style,
    );
    Ok(())
}

/// Figures go through the secondary classifier; small logos additionally
/// through the tertiary style classifier.
fn handle_figure(
    ctx: &mut RequestContext<'_>,
    buffers: &mut ScanBuffers,
    component_id: usize,
    detected: DetectedRegion,
) -> PosterResult<()> {
    ctx.artifacts
        .save_buffer_crop(component_id, "figure", &detected.crop)?;

    let class = match ctx.models.figure_classifier.classify(&detected.crop) {
        Ok(classification) => FigureClass::from_label(&classification.label),
        Err(e) => {
            warn!("figure classification failed, treating as diagram: {e}");
            FigureClass::Other
        }
    };

    match class {
        FigureClass::Logo => handle_logo_figure(ctx, buffers, detected),
        FigureClass::Table => {
            if let Some(saved) = persist(ctx, ComponentKind::Table, &detected)? {
                let label = format!("Table {}", saved.index);
                draw_labeled_box(
                    &mut ctx.overlay,
                    &detected.bbox,
                    FIGURE_TABLE_COLOR,
                    Some(&label),
                    &ctx.style,
                );
            }
            Ok(())
        }
        FigureClass::PieChart | FigureClass::BarGraphs | FigureClass::LineGraph => {
            let (kind, label) = match class {
                FigureClass::PieChart => (ComponentKind::PieChart, "Pie Chart"),
                FigureClass::BarGraphs => (ComponentKind::BarGraphs, "Bar Graphs"),
                _ => (ComponentKind::LineGraph, "Line graph"),
            };
            if persist(ctx, kind, &detected)?.is_some() {
                draw_labeled_box(
                    &mut ctx.overlay,
                    &detected.bbox,
                    CHART_COLOR,
                    Some(label),
                    &ctx.style,
                );
            }
            Ok(())
        }
        FigureClass::Other => save_diagram(ctx, &detected),
    }
}

/// A Logo-classified figure: large ones are really diagrams, small ones get
/// a style label and a spot on the logos-only overlay.
fn handle_logo_figure(
    ctx: &mut RequestContext<'_>,
    buffers: &mut ScanBuffers,
    detected: DetectedRegion,
) -> PosterResult<()> {
    let area = detected.bbox.area();
    if area >= ctx.config.logo_area_threshold {
        debug!(
            "logo-labeled region of area {area:.0} exceeds threshold {}, reclassifying as diagram",
            ctx.config.logo_area_threshold
        );
        return save_diagram(ctx, &detected);
    }

    let style = match ctx.models.logo_classifier.classify(&detected.crop) {
        Ok(classification) => LogoStyle::from_label(&classification.label),
        Err(e) => {
            warn!("logo style classification failed, treating as diagram: {e}");
            return save_diagram(ctx, &detected);
        }
    };

    let Some(saved) = persist(ctx, ComponentKind::Logo, &detected)? else {
        return Ok(());
    };
    let image = ctx.artifacts.save_logo_crop(saved.index, &detected.crop)?;
    buffers.logos.push(LogoInfo { image, style });

    let color = match style {
        LogoStyle::Simple => SIMPLE_LOGO_COLOR,
        LogoStyle::Complex => COMPLEX_LOGO_COLOR,
    };
    let label = format!("Logo {}", saved.index);
    draw_labeled_box(&mut ctx.overlay, &detected.bbox, color, Some(&label), &ctx.style);

    let original = ctx.original;
    let logo_overlay = ctx.logo_overlay.get_or_insert_with(|| original.clone());
    draw_labeled_box(logo_overlay, &detected.bbox, color, Some(&label), &ctx.style);

    Ok(())
}

fn save_diagram(ctx: &mut RequestContext<'_>, detected: &DetectedRegion) -> PosterResult<()> {
    if persist(ctx, ComponentKind::Diagram, detected)?.is_some() {
        draw_labeled_box(
            &mut ctx.overlay,
            &detected.bbox,
            DIAGRAM_COLOR,
            Some("Diagram"),
            &ctx.style,
        );
    }
    Ok(())
}

/// Directly-detected tables skip the figure classifier.
fn handle_table(ctx: &mut RequestContext<'_>, detected: DetectedRegion) -> PosterResult<()> {
    if persist(ctx, ComponentKind::Table, &detected)?.is_some() {
        draw_labeled_box(
            &mut ctx.overlay,
            &detected.bbox,
            TABLE_COLOR,
            Some("Table"),
            &ctx.style,
        );
    }
    Ok(())
}

/// Table captions, table footnotes, and figure captions share one handler.
fn handle_caption(ctx: &mut RequestContext<'_>, detected: DetectedRegion) -> PosterResult<()> {
    if persist(ctx, ComponentKind::Caption, &detected)?.is_some() {
        draw_labeled_box(
            &mut ctx.overlay,
            &detected.bbox,
            CAPTION_COLOR,
            Some("Caption"),
            &ctx.style,
        );
        ctx.evaluate_contrast(ComponentKind::Caption, &detected.bbox, &detected.crop);
    }
    Ok(())
}

/// Unknown labels only annotate the overlay; nothing is persisted.
fn handle_unknown(ctx: &mut RequestContext<'_>, detected: DetectedRegion) {
    draw_labeled_box(
        &mut ctx.overlay,
        &detected.bbox,
        UNKNOWN_COLOR,
        Some("Unknown"),
        &ctx.style,
    );
}
