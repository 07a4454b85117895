//! # Poster Access
//!
//! A Rust library that evaluates the accessibility of research-poster
//! images. A layout detection model segments a poster into semantic regions
//! (title, body text, figures, tables, captions, logos, author block);
//! deterministic classification rules refine the labels; and each region is
//! routed through the matching accessibility evaluator.
//!
//! ## Components
//!
//! - **Layout extraction**: one detector pass plus per-region dispatch with
//!   figure/logo sub-classification and an author-likeness heuristic
//! - **Title/author resolution**: whole-poster finalize passes picking the
//!   real title and the author block nearest to it
//! - **Color contrast**: WCAG contrast ratios from k=2 dominant-color
//!   clustering, checked against per-kind thresholds
//! - **Font size**: word-box height measurement over text components
//!
//! Model inference, OCR, and named-entity extraction are external
//! collaborators behind the traits in [`models`]; the pipeline itself is
//! pure compute plus local file I/O.
//!
//! ## Modules
//!
//! * [`core`] - Error handling and configuration
//! * [`domain`] - Region and report types
//! * [`evaluators`] - Accessibility evaluators
//! * [`models`] - Collaborator traits and label vocabularies
//! * [`pipeline`] - The extraction orchestrator
//! * [`processors`] - Geometry, cropping, and color clustering
//! * [`utils`] - Image loading and overlay drawing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use poster_access::prelude::*;
//!
//! # fn collaborators() -> ModelSet { unimplemented!() }
//! # fn main() -> Result<(), PosterError> {
//! // Construct model handles once at process start.
//! let models: ModelSet = collaborators();
//!
//! let extractor = PosterComponentExtractor::new(
//!     models,
//!     ExtractorConfig::default(),
//!     "artifacts/request-1",
//! )?;
//!
//! let extraction = extractor.extract_components("poster.png")?;
//! let report = extraction.report();
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod evaluators;
pub mod models;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Commonly used types, re-exported for convenience.
pub mod prelude {
    pub use crate::core::config::{
        ClusterConfig, ContrastConfig, ContrastThresholds, ExtractorConfig,
    };
    pub use crate::core::errors::{PosterError, PosterResult};
    pub use crate::domain::region::{ComponentKind, Region};
    pub use crate::domain::report::{
        Accessibility, ContrastReport, ContrastSection, FontSizeEntry, FontSizeReport, LogoEntry,
        LogoEvaluation, Report,
    };
    pub use crate::models::{
        Classification, DetectorLabel, Entity, EntityExtractor, FigureClass, ImageClassifier,
        LayoutDetection, LayoutDetector, LogoStyle, ModelSet, OcrEngine, WordBox,
    };
    pub use crate::pipeline::{ArtifactStore, PosterComponentExtractor, PosterExtraction};
    pub use crate::processors::geometry::BoundingBox;
}
