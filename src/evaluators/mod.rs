//! Accessibility evaluators applied to classified poster regions.

pub mod color_contrast;
pub mod font_size;

pub use color_contrast::{ColorContrastEvaluator, contrast_ratio, relative_luminance};
pub use font_size::FontSizeEvaluator;
