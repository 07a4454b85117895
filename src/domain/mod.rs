//! Domain types for poster component extraction.
//!
//! This module defines the region model (bounding boxes with semantic
//! labels) and the report aggregates returned to callers.

pub mod region;
pub mod report;

pub use region::{ComponentKind, Region};
pub use report::{
    Accessibility, ContrastReport, ContrastSection, FontSizeEntry, FontSizeReport, LogoEntry,
    LogoEvaluation, Report,
};
