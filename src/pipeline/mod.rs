//! The poster extraction pipeline.
//!
//! Control flow: image → layout detector → per-detection dispatch →
//! buffered candidates → finalize passes → report assembly. The
//! [`PosterComponentExtractor`] is the public entry point.

pub mod artifacts;
pub(crate) mod context;
pub(crate) mod dispatch;
pub mod extractor;
pub(crate) mod finalize;
pub mod scan;

pub use artifacts::{ArtifactStore, SavedComponent};
pub use extractor::{PosterComponentExtractor, PosterExtraction};
pub use scan::{AuthorCandidate, LogoInfo, ScanBuffers, TitleCandidate};
