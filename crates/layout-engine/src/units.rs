//! Millimeter/pixel conversion and physical page dimensions.
//!
//! Conversions round to the nearest whole pixel, ties to even: a half-pixel
//! length like 562.5 lands on 562, never 563. The typed wrappers validate
//! their values up front so the conversion math itself stays non-defensive.

use crate::geometry::Size;
use crate::{LayoutError, Result};

/// Millimeters per inch, the basis for DPI conversion.
pub const MM_PER_INCH: f64 = 25.4;

/// Convert a physical length in millimeters to pixels at the given resolution.
pub fn mm_to_px(mm: f64, dpi: f64) -> u32 {
    (mm * dpi / MM_PER_INCH).round_ties_even() as u32
}

/// Convert a pixel count back to millimeters at the given resolution.
pub fn px_to_mm(px: u32, dpi: f64) -> f64 {
    f64::from(px) * MM_PER_INCH / dpi
}

/// Physical page size in millimeters.
///
/// Operator-facing bounds are 1 to 1000 mm per side; `validate` only enforces
/// the hard requirement that both sides are positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PhysicalSize {
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_positive("Page width", self.width_mm)?;
        validate_positive("Page height", self.height_mm)?;
        Ok(())
    }

    /// Page size in pixels at the given resolution.
    pub fn to_px(&self, resolution: Resolution) -> Size {
        Size::new(
            mm_to_px(self.width_mm, resolution.dpi),
            mm_to_px(self.height_mm, resolution.dpi),
        )
    }
}

/// Print resolution in dots per inch.
///
/// Valid range is (72, 1200]; label printers typically run at 203 or 300 dpi.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub dpi: f64,
}

impl Resolution {
    pub fn new(dpi: f64) -> Self {
        Self { dpi }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.dpi.is_finite() || self.dpi <= 72.0 || self.dpi > 1200.0 {
            return Err(LayoutError::ResolutionOutOfRange(self.dpi));
        }
        Ok(())
    }
}

/// Page margins in millimeters, anchored top-left.
///
/// The layout model has no right or bottom margins; content is placed
/// relative to the top-left corner of the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub left_mm: f64,
    pub top_mm: f64,
}

impl Margins {
    pub fn new(left_mm: f64, top_mm: f64) -> Self {
        Self { left_mm, top_mm }
    }

    pub fn validate(&self) -> Result<()> {
        validate_non_negative("Left margin", self.left_mm)?;
        validate_non_negative("Top margin", self.top_mm)?;
        Ok(())
    }

    /// Margin offsets in pixels at the given resolution.
    pub fn to_px(&self, resolution: Resolution) -> (u32, u32) {
        (
            mm_to_px(self.left_mm, resolution.dpi),
            mm_to_px(self.top_mm, resolution.dpi),
        )
    }
}

fn validate_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(LayoutError::InvalidDimension { name, value });
    }
    Ok(())
}

fn validate_non_negative(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LayoutError::InvalidMargin { name, value });
    }
    Ok(())
}
