//! The core module of the poster evaluation pipeline.
//!
//! This module contains the fundamental shared components:
//! - Error handling
//! - Configuration management
//!
//! It also re-exports the commonly used types for convenience.

pub mod config;
pub mod errors;

pub use config::{ClusterConfig, ContrastConfig, ContrastThresholds, ExtractorConfig};
pub use errors::{PosterError, PosterResult};
