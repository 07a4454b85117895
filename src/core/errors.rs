//! Core error types for the poster evaluation pipeline.
//!
//! This module defines the error taxonomy used throughout the pipeline.
//! Whole-poster failures (an unreadable source image) abort an extraction;
//! everything else is scoped to a single region and recovered by the caller.

use std::path::Path;
use thiserror::Error;

/// A convenient result alias used across the crate.
pub type PosterResult<T> = Result<T, PosterError>;

/// Errors that can occur while extracting and evaluating poster components.
#[derive(Debug, Error)]
pub enum PosterError {
    /// The source poster image could not be read or decoded.
    ///
    /// This is the only error that aborts a whole extraction.
    #[error("failed to decode poster image '{path}'")]
    Decode {
        /// Path of the image that failed to decode.
        path: String,
        /// The underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// A region crop was empty or degenerate and cannot be evaluated.
    ///
    /// Fatal to the affected region only; the poster keeps scanning.
    #[error("invalid region: {message}")]
    InvalidRegion {
        /// A message describing why the region is unusable.
        message: String,
    },

    /// A sub-model (layout detector, figure or logo classifier) call failed.
    #[error("classification failed in model '{model}': {context}")]
    Classification {
        /// The name of the model that failed.
        model: String,
        /// Additional context about the failure.
        context: String,
        /// The underlying error, when one is available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The OCR collaborator failed to extract text or word boxes.
    #[error("text extraction failed: {context}")]
    Ocr {
        /// Additional context about the failure.
        context: String,
        /// The underlying error, when one is available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The named-entity collaborator failed.
    #[error("entity extraction failed: {context}")]
    Nlp {
        /// Additional context about the failure.
        context: String,
        /// The underlying error, when one is available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    Config {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error while encoding or saving an image artifact.
    #[error("image write")]
    ImageWrite(#[from] image::ImageError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl PosterError {
    /// Creates a decode error for the given source path.
    pub fn decode(path: &Path, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.display().to_string(),
            source,
        }
    }

    /// Creates an invalid-region error with the given message.
    pub fn invalid_region(message: impl Into<String>) -> Self {
        Self::InvalidRegion {
            message: message.into(),
        }
    }

    /// Creates a classification error for the named model.
    pub fn classification(model: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Classification {
            model: model.into(),
            context: context.into(),
            source: None,
        }
    }

    /// Wraps an underlying error from a model call.
    pub fn classification_with_source(
        model: impl Into<String>,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Classification {
            model: model.into(),
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an OCR error with the given context.
    pub fn ocr(context: impl Into<String>) -> Self {
        Self::Ocr {
            context: context.into(),
            source: None,
        }
    }

    /// Creates an NLP error with the given context.
    pub fn nlp(context: impl Into<String>) -> Self {
        Self::Nlp {
            context: context.into(),
            source: None,
        }
    }

    /// Creates a configuration error with context and details.
    pub fn config_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Config {
            message: format!("{}: {}", context.into(), details.into()),
        }
    }
}
