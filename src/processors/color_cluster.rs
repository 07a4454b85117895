//! Dominant color extraction via k=2 pixel clustering.
//!
//! The contrast evaluator assumes a region is mostly two colors: text and
//! background. Pixels are clustered into two RGB centers with a randomized
//! restarting k-means, then a thin border band votes on which cluster is the
//! background (borders of a text block are overwhelmingly background).

use crate::core::config::ClusterConfig;
use crate::core::errors::{PosterError, PosterResult};
use image::{Rgb, RgbImage};
use rand::Rng;

/// The two dominant colors of a region crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DominantColors {
    /// The presumed text (foreground) color.
    pub text: Rgb<u8>,
    /// The presumed background color.
    pub background: Rgb<u8>,
}

/// Extracts the dominant text and background colors of a crop.
///
/// `border_band` is the width in pixels of the outer frame used for the
/// background vote; it is clamped to the crop dimensions.
pub fn dominant_colors(
    image: &RgbImage,
    clustering: &ClusterConfig,
    border_band: u32,
) -> PosterResult<DominantColors> {
    if image.width() == 0 || image.height() == 0 {
        return Err(PosterError::invalid_region(
            "cannot cluster colors of an empty crop",
        ));
    }

    let pixels: Vec<[f32; 3]> = image
        .pixels()
        .map(|p| [p.0[0] as f32, p.0[1] as f32, p.0[2] as f32])
        .collect();

    let centers = cluster_two(&pixels, clustering);

    let (vote_first, vote_second) = border_votes(image, &centers, border_band);
    let (background, text) = if vote_second > vote_first {
        (centers[1], centers[0])
    } else {
        (centers[0], centers[1])
    };

    Ok(DominantColors {
        text: quantize(text),
        background: quantize(background),
    })
}

/// Runs k=2 k-means with randomized restarts and returns the centers of the
/// lowest-inertia run.
fn cluster_two(pixels: &[[f32; 3]], config: &ClusterConfig) -> [[f32; 3]; 2] {
    let mut rng = rand::thread_rng();
    let mut best_centers = [pixels[0], pixels[pixels.len() - 1]];
    let mut best_inertia = f32::INFINITY;

    for _ in 0..config.restarts {
        let seeds = pick_seeds(pixels, &mut rng);
        let (centers, inertia) = lloyd_iterations(pixels, seeds, config);
        if inertia < best_inertia {
            best_inertia = inertia;
            best_centers = centers;
        }
    }

    best_centers
}

/// Picks two random seed pixels, preferring distinct colors when any exist.
fn pick_seeds(pixels: &[[f32; 3]], rng: &mut impl Rng) -> [[f32; 3]; 2] {
    let first = pixels[rng.gen_range(0..pixels.len())];
    let mut second = pixels[rng.gen_range(0..pixels.len())];
    for _ in 0..10 {
        if second != first {
            break;
        }
        second = pixels[rng.gen_range(0..pixels.len())];
    }
    [first, second]
}

/// Standard assignment/update iterations until the centers move less than
/// epsilon or the iteration limit is reached. Returns the final centers and
/// the total squared-distance inertia.
fn lloyd_iterations(
    pixels: &[[f32; 3]],
    mut centers: [[f32; 3]; 2],
    config: &ClusterConfig,
) -> ([[f32; 3]; 2], f32) {
    for _ in 0..config.max_iterations {
        let mut sums = [[0.0f32; 3]; 2];
        let mut counts = [0usize; 2];

        for pixel in pixels {
            let cluster = nearest_center(pixel, &centers);
            for channel in 0..3 {
                sums[cluster][channel] += pixel[channel];
            }
            counts[cluster] += 1;
        }

        let mut max_shift = 0.0f32;
        for cluster in 0..2 {
            if counts[cluster] == 0 {
                continue;
            }
            let mut updated = [0.0f32; 3];
            for channel in 0..3 {
                updated[channel] = sums[cluster][channel] / counts[cluster] as f32;
            }
            max_shift = max_shift.max(squared_distance(&centers[cluster], &updated).sqrt());
            centers[cluster] = updated;
        }

        if max_shift <= config.epsilon {
            break;
        }
    }

    let inertia = pixels
        .iter()
        .map(|p| squared_distance(p, &centers[nearest_center(p, &centers)]))
        .sum();

    (centers, inertia)
}

fn nearest_center(pixel: &[f32; 3], centers: &[[f32; 3]; 2]) -> usize {
    if squared_distance(pixel, &centers[1]) < squared_distance(pixel, &centers[0]) {
        1
    } else {
        0
    }
}

fn squared_distance(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let mut sum = 0.0;
    for channel in 0..3 {
        let d = a[channel] - b[channel];
        sum += d * d;
    }
    sum
}

/// Counts, over the outer border band, how many pixels sit strictly closer
/// to each cluster center. Ties vote for neither side.
fn border_votes(image: &RgbImage, centers: &[[f32; 3]; 2], border_band: u32) -> (usize, usize) {
    let band = border_band.min(image.width()).min(image.height());
    let mut vote_first = 0usize;
    let mut vote_second = 0usize;

    for (x, y, pixel) in image.enumerate_pixels() {
        let in_band = x < band
            || x >= image.width() - band
            || y < band
            || y >= image.height() - band;
        if !in_band {
            continue;
        }
        let p = [pixel.0[0] as f32, pixel.0[1] as f32, pixel.0[2] as f32];
        let d0 = squared_distance(&p, &centers[0]);
        let d1 = squared_distance(&p, &centers[1]);
        if d0 < d1 {
            vote_first += 1;
        } else if d1 < d0 {
            vote_second += 1;
        }
    }

    (vote_first, vote_second)
}

fn quantize(center: [f32; 3]) -> Rgb<u8> {
    Rgb([
        center[0].round().clamp(0.0, 255.0) as u8,
        center[1].round().clamp(0.0, 255.0) as u8,
        center[2].round().clamp(0.0, 255.0) as u8,
    ])
}
