//! Request-scoped artifact storage.
//!
//! Every persisted region becomes a flat file under the request's artifact
//! root and is referenced through the `get-image/<relative path>` URL
//! scheme. Per-kind counters generate stable, collision-free filenames
//! (`{kind}_{n}.jpg`) for one extraction request.

use crate::core::errors::PosterResult;
use crate::domain::region::{ComponentKind, Region};
use image::RgbImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

const RAW_COMPONENTS_DIR: &str = "raw_components";
const BUFFER_DIR: &str = "buffer";
const OUTPUT_DIR: &str = "output";
const LOGOS_DIR: &str = "output/logos";
const CONTRAST_DIR: &str = "output/color_contrast";

const LAYOUT_OVERLAY_FILE: &str = "extracted_components.png";
const LOGOS_OVERLAY_FILE: &str = "logos_annotated.png";
const CONTRAST_OVERLAY_FILE: &str = "color_contrast_result.png";

/// A persisted component crop.
#[derive(Debug, Clone)]
pub struct SavedComponent {
    /// The component kind.
    pub kind: ComponentKind,
    /// 1-based per-kind index.
    pub index: u32,
    /// Filename stem, `{kind}_{index}`.
    pub stem: String,
    /// Absolute path of the persisted crop.
    pub path: PathBuf,
    /// `get-image/` URL of the persisted crop.
    pub url: String,
}

/// Flat filesystem artifact store for one extraction request.
///
/// Owns the per-kind counters; two concurrent requests must use distinct
/// roots.
#[derive(Debug)]
pub struct ArtifactStore {
    root: PathBuf,
    counters: HashMap<ComponentKind, u32>,
    saved: Vec<SavedComponent>,
}

impl ArtifactStore {
    /// Creates the store, making sure every artifact directory exists.
    pub fn new(root: impl Into<PathBuf>) -> PosterResult<Self> {
        let root = root.into();
        for dir in [
            RAW_COMPONENTS_DIR,
            BUFFER_DIR,
            OUTPUT_DIR,
            LOGOS_DIR,
            CONTRAST_DIR,
        ] {
            std::fs::create_dir_all(root.join(dir))?;
        }
        Ok(Self {
            root,
            counters: HashMap::new(),
            saved: Vec::new(),
        })
    }

    /// The artifact root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Removes every file from the artifact directories and resets the
    /// counters. Subdirectories are left in place.
    pub fn clear(&mut self) -> PosterResult<()> {
        for dir in [
            RAW_COMPONENTS_DIR,
            BUFFER_DIR,
            LOGOS_DIR,
            CONTRAST_DIR,
            OUTPUT_DIR,
        ] {
            let dir = self.root.join(dir);
            for entry in std::fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_file() {
                    std::fs::remove_file(&path)?;
                }
            }
        }
        self.counters.clear();
        self.saved.clear();
        Ok(())
    }

    /// Persists a classified region crop as `{kind}_{n}.jpg`, bumping that
    /// kind's counter.
    pub fn save_region(&mut self, region: &Region) -> PosterResult<SavedComponent> {
        let counter = self.counters.entry(region.kind).or_insert(0);
        *counter += 1;
        let index = *counter;

        let stem = format!("{}_{}", region.kind.as_str(), index);
        let relative = format!("{RAW_COMPONENTS_DIR}/{stem}.jpg");
        let path = self.root.join(&relative);
        region.crop.save(&path)?;
        debug!("saved {} component to {}", region.kind, path.display());

        let saved = SavedComponent {
            kind: region.kind,
            index,
            stem,
            path,
            url: Self::url_for(&relative),
        };
        self.saved.push(saved.clone());
        Ok(saved)
    }

    /// Persists a scratch crop for a detector row, keyed by its detection
    /// order and detector label.
    pub fn save_buffer_crop(
        &self,
        component_id: usize,
        tag: &str,
        crop: &RgbImage,
    ) -> PosterResult<PathBuf> {
        let path = self.root.join(BUFFER_DIR).join(format!("{component_id}_{tag}.jpg"));
        crop.save(&path)?;
        Ok(path)
    }

    /// Persists a logo crop as `logo_{n}.png` under the logos directory and
    /// returns its URL.
    pub fn save_logo_crop(&self, index: u32, crop: &RgbImage) -> PosterResult<String> {
        let relative = format!("{LOGOS_DIR}/logo_{index}.png");
        crop.save(self.root.join(&relative))?;
        Ok(Self::url_for(&relative))
    }

    /// Persists the annotated extracted-components overlay.
    pub fn save_layout_overlay(&self, overlay: &RgbImage) -> PosterResult<String> {
        let relative = format!("{OUTPUT_DIR}/{LAYOUT_OVERLAY_FILE}");
        overlay.save(self.root.join(&relative))?;
        Ok(Self::url_for(&relative))
    }

    /// Persists the logos-only annotated overlay.
    pub fn save_logos_overlay(&self, overlay: &RgbImage) -> PosterResult<String> {
        let relative = format!("{LOGOS_DIR}/{LOGOS_OVERLAY_FILE}");
        overlay.save(self.root.join(&relative))?;
        Ok(Self::url_for(&relative))
    }

    /// Persists the annotated contrast overlay.
    pub fn save_contrast_overlay(&self, overlay: &RgbImage) -> PosterResult<String> {
        let relative = format!("{CONTRAST_DIR}/{CONTRAST_OVERLAY_FILE}");
        overlay.save(self.root.join(&relative))?;
        Ok(Self::url_for(&relative))
    }

    /// The URL of the contrast overlay, without persisting anything.
    pub fn contrast_overlay_url(&self) -> String {
        Self::url_for(&format!("{CONTRAST_DIR}/{CONTRAST_OVERLAY_FILE}"))
    }

    /// Persists one contrast section crop as `section_{id}.png`.
    pub fn save_contrast_section(&self, section_id: usize, crop: &RgbImage) -> PosterResult<String> {
        let relative = format!("{CONTRAST_DIR}/section_{section_id}.png");
        crop.save(self.root.join(&relative))?;
        Ok(Self::url_for(&relative))
    }

    /// The components persisted so far, in save order.
    pub fn saved_components(&self) -> &[SavedComponent] {
        &self.saved
    }

    /// Maps a root-relative artifact path to its serving URL.
    pub fn url_for(relative: &str) -> String {
        format!("get-image/{relative}")
    }
}
