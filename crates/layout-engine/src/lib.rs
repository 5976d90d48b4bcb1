//! Image-to-page layout and fitting engine.
//!
//! Converts physical dimensions to pixels, parses aspect-ratio targets,
//! and computes deterministic pixel placements for padding and page
//! rendering. All geometry is pure; raster work lives in [`pad`] and
//! [`text`].

use std::path::PathBuf;

pub mod fit;
pub mod geometry;
pub mod pad;
pub mod placement;
pub mod ratio;
pub mod text;
pub mod units;

// Re-exports for convenience
pub use fit::{PadPlan, RATIO_TOLERANCE, plan_fit};
pub use geometry::{Rect, Size};
pub use pad::{pad_image, pad_image_file};
pub use placement::{FitPolicy, Placement, plan_page};
pub use ratio::{ParseError, RatioSpec};
pub use text::render_label;
pub use units::{Margins, PhysicalSize, Resolution, mm_to_px, px_to_mm};

/// Errors that can occur during layout and padding operations.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("{name} must be positive and finite, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("Resolution must be in (72, 1200] dpi, got {0}")]
    ResolutionOutOfRange(f64),

    #[error("{name} must be non-negative and finite, got {value}")]
    InvalidMargin { name: &'static str, value: f64 },

    #[error("Source image has no pixels ({width}x{height})")]
    EmptySource { width: u32, height: u32 },

    #[error("Failed to decode image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write image {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
