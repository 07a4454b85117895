//! Whole-poster finalize passes.
//!
//! Runs once, after every detector row has been dispatched. Title
//! resolution promotes the largest buffered candidate to `title` and demotes
//! the rest to `heading`; author resolution associates the nearest buffered
//! author candidate with the winning title when it lies strictly inside the
//! distance cutoff. Both passes consume the scan buffers, so they cannot run
//! before (or without) a scan.

use crate::core::errors::PosterResult;
use crate::domain::region::{ComponentKind, Region};
use crate::pipeline::context::RequestContext;
use crate::pipeline::dispatch::AUTHORS_COLOR;
use crate::pipeline::scan::{AuthorCandidate, LogoInfo, ScanBuffers, TitleCandidate};
use crate::processors::crop::crop_region;
use crate::processors::geometry::BoundingBox;
use crate::utils::visualization::draw_labeled_box;
use image::Rgb;
use tracing::{debug, warn};

const TITLE_COLOR: Rgb<u8> = Rgb([255, 0, 255]);
const HEADING_COLOR: Rgb<u8> = Rgb([255, 165, 0]);

/// The outcome of the finalize passes.
#[derive(Debug)]
pub(crate) struct ResolvedPoster {
    /// The winning title's bounding box, when any candidate was buffered.
    pub title: Option<BoundingBox>,
    /// The promoted author candidate, when one qualified.
    pub author: Option<AuthorCandidate>,
    /// Detected logos, passed through untouched for report assembly.
    pub logos: Vec<LogoInfo>,
}

/// Runs both finalize passes over the scan buffers.
pub(crate) fn resolve(
    ctx: &mut RequestContext<'_>,
    buffers: ScanBuffers,
) -> PosterResult<ResolvedPoster> {
    let ScanBuffers {
        titles,
        authors,
        logos,
    } = buffers;

    let title = resolve_titles(ctx, &titles)?;
    let author = resolve_authors(ctx, title.as_ref(), &authors);
    Ok(ResolvedPoster {
        title,
        author,
        logos,
    })
}

/// Promotes the maximum-area candidate to `title` and the rest to
/// `heading`. A no-op when nothing was buffered.
///
/// Equal areas keep the first-encountered candidate, so the outcome is
/// stable in detection order.
fn resolve_titles(
    ctx: &mut RequestContext<'_>,
    titles: &[TitleCandidate],
) -> PosterResult<Option<BoundingBox>> {
    if titles.is_empty() {
        return Ok(None);
    }

    let mut winner = 0;
    for (idx, candidate) in titles.iter().enumerate() {
        if candidate.area > titles[winner].area {
            winner = idx;
        }
    }

    for (idx, candidate) in titles.iter().enumerate() {
        let (kind, label, color) = if idx == winner {
            (ComponentKind::Title, "Title", TITLE_COLOR)
        } else {
            (ComponentKind::Heading, "Heading", HEADING_COLOR)
        };

        let crop = match crop_region(ctx.original, &candidate.bbox) {
            Ok(crop) => crop,
            Err(e) => {
                warn!(
                    "skipping {kind} from detection {}: {e}",
                    candidate.component_id
                );
                continue;
            }
        };
        let region = match Region::new(kind, candidate.bbox, crop) {
            Ok(region) => region,
            Err(e) => {
                warn!(
                    "skipping {kind} from detection {}: {e}",
                    candidate.component_id
                );
                continue;
            }
        };

        ctx.artifacts.save_region(&region)?;
        draw_labeled_box(&mut ctx.overlay, &candidate.bbox, color, Some(label), &ctx.style);
        ctx.evaluate_contrast(kind, &candidate.bbox, &region.crop);
    }

    Ok(Some(titles[winner].bbox))
}

/// Promotes the author candidate nearest to the title center, if any lies
/// strictly closer than the configured cutoff.
///
/// Requires a resolved title; equal distances keep the first-encountered
/// candidate.
fn resolve_authors(
    ctx: &mut RequestContext<'_>,
    title: Option<&BoundingBox>,
    authors: &[AuthorCandidate],
) -> Option<AuthorCandidate> {
    let title = title?;
    if authors.is_empty() {
        return None;
    }

    let mut closest = 0;
    let mut min_distance = authors[0].bbox.center_distance(title);
    for (idx, candidate) in authors.iter().enumerate().skip(1) {
        let distance = candidate.bbox.center_distance(title);
        if distance < min_distance {
            min_distance = distance;
            closest = idx;
        }
    }

    // The cutoff is exclusive: a candidate exactly at the boundary loses.
    if min_distance < ctx.config.author_distance_cutoff {
        let candidate = authors[closest].clone();
        debug!(
            "author block '{}' promoted at distance {min_distance:.1} from title",
            candidate.text
        );
        draw_labeled_box(
            &mut ctx.overlay,
            &candidate.bbox,
            AUTHORS_COLOR,
            Some("Authors"),
            &ctx.style,
        );
        Some(candidate)
    } else {
        debug!(
            "nearest author candidate at distance {min_distance:.1} exceeds cutoff {}, none promoted",
            ctx.config.author_distance_cutoff
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ExtractorConfig;
    use crate::domain::region::ComponentKind;
    use crate::evaluators::color_contrast::ColorContrastEvaluator;
    use crate::models::ModelSet;
    use crate::pipeline::artifacts::ArtifactStore;
    use crate::pipeline::testing::model_set;
    use crate::utils::visualization::LabelStyle;
    use image::{Rgb, RgbImage};

    struct Fixture {
        _dir: tempfile::TempDir,
        config: ExtractorConfig,
        models: ModelSet,
        original: RgbImage,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                _dir: tempfile::tempdir().unwrap(),
                config: ExtractorConfig::default(),
                models: model_set(Vec::new(), "Logo", "Simple", "", false),
                original: RgbImage::from_pixel(800, 800, Rgb([255, 255, 255])),
            }
        }

        fn context(&self) -> RequestContext<'_> {
            RequestContext {
                config: &self.config,
                models: &self.models,
                original: &self.original,
                artifacts: ArtifactStore::new(self._dir.path()).unwrap(),
                overlay: self.original.clone(),
                logo_overlay: None,
                contrast: ColorContrastEvaluator::new(
                    &self.original,
                    self.config.contrast.clone(),
                ),
                style: LabelStyle::default(),
            }
        }
    }

    fn title(component_id: usize, bbox: BoundingBox) -> TitleCandidate {
        TitleCandidate {
            component_id,
            bbox,
            area: bbox.area(),
        }
    }

    fn author(bbox: BoundingBox) -> AuthorCandidate {
        AuthorCandidate {
            bbox,
            text: "Jane Doe".to_string(),
        }
    }

    fn saved_kinds(artifacts: &ArtifactStore) -> Vec<ComponentKind> {
        artifacts
            .saved_components()
            .iter()
            .map(|saved| saved.kind)
            .collect()
    }

    #[test]
    fn test_no_candidates_is_a_noop() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();
        let resolved = resolve(&mut ctx, ScanBuffers::new()).unwrap();
        assert!(resolved.title.is_none());
        assert!(resolved.author.is_none());
        assert!(ctx.artifacts.saved_components().is_empty());
    }

    #[test]
    fn test_single_candidate_becomes_title() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();
        let mut buffers = ScanBuffers::new();
        let bbox = BoundingBox::from_coords(100.0, 50.0, 300.0, 100.0);
        buffers.titles.push(title(0, bbox));

        let resolved = resolve(&mut ctx, buffers).unwrap();
        assert_eq!(resolved.title, Some(bbox));
        assert_eq!(saved_kinds(&ctx.artifacts), vec![ComponentKind::Title]);
    }

    #[test]
    fn test_largest_candidate_wins_rest_become_headings() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();
        let mut buffers = ScanBuffers::new();
        // Areas 2000, 5000, 1200; the second candidate must win.
        let small = BoundingBox::from_coords(0.0, 0.0, 100.0, 20.0);
        let large = BoundingBox::from_coords(100.0, 0.0, 200.0, 50.0);
        let smallest = BoundingBox::from_coords(200.0, 0.0, 260.0, 20.0);
        buffers.titles.push(title(0, small));
        buffers.titles.push(title(1, large));
        buffers.titles.push(title(2, smallest));

        let resolved = resolve(&mut ctx, buffers).unwrap();
        assert_eq!(resolved.title, Some(large));

        let kinds = saved_kinds(&ctx.artifacts);
        assert_eq!(
            kinds.iter().filter(|k| **k == ComponentKind::Title).count(),
            1
        );
        assert_eq!(
            kinds
                .iter()
                .filter(|k| **k == ComponentKind::Heading)
                .count(),
            2
        );
    }

    #[test]
    fn test_equal_areas_keep_first_candidate() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();
        let mut buffers = ScanBuffers::new();
        let first = BoundingBox::from_coords(0.0, 0.0, 100.0, 40.0);
        let second = BoundingBox::from_coords(200.0, 0.0, 300.0, 40.0);
        buffers.titles.push(title(0, first));
        buffers.titles.push(title(1, second));

        let resolved = resolve(&mut ctx, buffers).unwrap();
        assert_eq!(resolved.title, Some(first));
    }

    #[test]
    fn test_author_within_cutoff_is_promoted() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();
        let mut buffers = ScanBuffers::new();
        // Title center at (200, 25).
        buffers
            .titles
            .push(title(0, BoundingBox::from_coords(100.0, 0.0, 300.0, 50.0)));
        // Author center at (200, 324): distance 299, strictly inside 300.
        buffers
            .authors
            .push(author(BoundingBox::from_coords(150.0, 314.0, 250.0, 334.0)));

        let resolved = resolve(&mut ctx, buffers).unwrap();
        assert!(resolved.author.is_some());
    }

    #[test]
    fn test_author_at_cutoff_is_not_promoted() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();
        let mut buffers = ScanBuffers::new();
        // Title center at (200, 25).
        buffers
            .titles
            .push(title(0, BoundingBox::from_coords(100.0, 0.0, 300.0, 50.0)));
        // Author center at (200, 325): distance exactly 300 loses.
        buffers
            .authors
            .push(author(BoundingBox::from_coords(150.0, 315.0, 250.0, 335.0)));

        let resolved = resolve(&mut ctx, buffers).unwrap();
        assert!(resolved.author.is_none());
    }

    #[test]
    fn test_nearest_author_is_selected() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();
        let mut buffers = ScanBuffers::new();
        // Title center at (200, 25).
        buffers
            .titles
            .push(title(0, BoundingBox::from_coords(100.0, 0.0, 300.0, 50.0)));
        let far = author(BoundingBox::from_coords(150.0, 250.0, 250.0, 270.0));
        let near = author(BoundingBox::from_coords(150.0, 100.0, 250.0, 120.0));
        buffers.authors.push(far);
        buffers.authors.push(near.clone());

        let resolved = resolve(&mut ctx, buffers).unwrap();
        assert_eq!(resolved.author.unwrap().bbox, near.bbox);
    }

    #[test]
    fn test_author_requires_resolved_title() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();
        let mut buffers = ScanBuffers::new();
        buffers
            .authors
            .push(author(BoundingBox::from_coords(150.0, 100.0, 250.0, 120.0)));

        let resolved = resolve(&mut ctx, buffers).unwrap();
        assert!(resolved.author.is_none());
    }
}
