//! Pixel-space primitives shared across the layout modules.

use std::fmt;

/// Integer pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width-to-height ratio.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// An axis-aligned pixel rectangle, anchored top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Round a fractional pixel count, keeping at least one pixel.
pub(crate) fn round_px(value: f64) -> u32 {
    value.round_ties_even().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(Size::new(1000, 500).aspect_ratio(), 2.0);
        assert_eq!(Size::new(800, 600).aspect_ratio(), 800.0 / 600.0);
    }

    #[test]
    fn test_size_display() {
        assert_eq!(Size::new(1000, 562).to_string(), "1000x562");
    }

    #[test]
    fn test_round_px_ties_to_even() {
        assert_eq!(round_px(562.5), 562);
        assert_eq!(round_px(563.5), 564);
        assert_eq!(round_px(562.51), 563);
    }

    #[test]
    fn test_round_px_floor_is_one() {
        assert_eq!(round_px(0.2), 1);
        assert_eq!(round_px(0.0), 1);
    }
}
