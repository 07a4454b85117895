//! Utility functions for the poster evaluation pipeline.

pub mod image;
pub mod visualization;

pub use image::load_image;
pub use visualization::{LabelStyle, draw_labeled_box};

/// Initializes the global tracing subscriber from `RUST_LOG`.
///
/// Intended for binaries and examples; libraries should not install a
/// subscriber themselves.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
