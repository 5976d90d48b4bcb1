//! Fit-and-pad planning.
//!
//! Pure geometry: given source pixel dimensions and a parsed target, compute
//! the content size, canvas size, and padding split without touching pixels.
//! [`crate::pad`] materializes these plans onto rasters.

use tracing::debug;

use crate::geometry::{Size, round_px};
use crate::ratio::RatioSpec;
use crate::{LayoutError, Result};

/// How far a source ratio may drift from a ratio target before padding
/// kicks in. Sources within tolerance pass through untouched.
pub const RATIO_TOLERANCE: f64 = 0.01;

/// A computed fit-and-pad layout.
///
/// `content` is the (possibly rescaled) image footprint inside `canvas`;
/// padding fills the remainder, with any odd pixel on the right/bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadPlan {
    pub content: Size,
    pub canvas: Size,
    pub pad_left: u32,
    pub pad_right: u32,
    pub pad_top: u32,
    pub pad_bottom: u32,
    /// True when the content dimensions differ from the source.
    pub resized: bool,
}

impl PadPlan {
    /// True when the source already matched the target and passes through
    /// unchanged, with no padding and no rescale.
    pub fn is_passthrough(&self) -> bool {
        !self.resized && self.content == self.canvas
    }
}

/// Compute the fit-and-pad layout for a source against a target.
///
/// Explicit-size targets always scale the content to its maximal footprint
/// inside the target canvas. Ratio targets keep the source pixels and grow
/// exactly one dimension; a source within [`RATIO_TOLERANCE`] of the target
/// ratio is returned as a passthrough plan.
pub fn plan_fit(source: Size, target: &RatioSpec) -> Result<PadPlan> {
    if source.width == 0 || source.height == 0 {
        return Err(LayoutError::EmptySource {
            width: source.width,
            height: source.height,
        });
    }

    match *target {
        RatioSpec::ExplicitSize { width, height } => {
            let scale = (f64::from(width) / f64::from(source.width))
                .min(f64::from(height) / f64::from(source.height));
            let content = Size::new(
                round_px(f64::from(source.width) * scale),
                round_px(f64::from(source.height) * scale),
            );
            let canvas = Size::new(width, height);
            debug!(%source, %content, %canvas, scale, "Scaling to explicit size");
            Ok(distribute_padding(source, content, canvas))
        }
        RatioSpec::Ratio { width, height } => {
            let target_ratio = width / height;
            let source_ratio = source.aspect_ratio();
            if (source_ratio - target_ratio).abs() < RATIO_TOLERANCE {
                debug!(%source, target_ratio, "Source within ratio tolerance, passing through");
                return Ok(PadPlan {
                    content: source,
                    canvas: source,
                    pad_left: 0,
                    pad_right: 0,
                    pad_top: 0,
                    pad_bottom: 0,
                    resized: false,
                });
            }

            // Grow exactly one dimension. Using the ratio components keeps
            // the division exact for integer ratios like 16:9.
            let canvas = if source_ratio > target_ratio {
                Size::new(
                    source.width,
                    round_px(f64::from(source.width) * height / width),
                )
            } else {
                Size::new(
                    round_px(f64::from(source.height) * width / height),
                    source.height,
                )
            };
            debug!(%source, %canvas, source_ratio, target_ratio, "Padding to ratio");
            Ok(distribute_padding(source, source, canvas))
        }
    }
}

/// Split the canvas/content gap into symmetric padding, odd pixel to the
/// right/bottom. Content larger than the canvas on either axis is rescaled
/// down to fit before the split.
fn distribute_padding(source: Size, content: Size, canvas: Size) -> PadPlan {
    let mut content = content;
    if content.width > canvas.width || content.height > canvas.height {
        let scale = (f64::from(canvas.width) / f64::from(content.width))
            .min(f64::from(canvas.height) / f64::from(content.height));
        content = Size::new(
            round_px(f64::from(content.width) * scale),
            round_px(f64::from(content.height) * scale),
        );
        debug!(%content, %canvas, scale, "Rescaled content to fit canvas");
    }

    let gap_w = canvas.width - content.width;
    let gap_h = canvas.height - content.height;
    let pad_left = gap_w / 2;
    let pad_top = gap_h / 2;

    PadPlan {
        content,
        canvas,
        pad_left,
        pad_right: gap_w - pad_left,
        pad_top,
        pad_bottom: gap_h - pad_top,
        resized: content != source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_source_pads_vertically() {
        // 1000x500 against 16:9 grows the height to 562.
        let plan = plan_fit(
            Size::new(1000, 500),
            &RatioSpec::Ratio {
                width: 16.0,
                height: 9.0,
            },
        )
        .unwrap();

        assert_eq!(plan.canvas, Size::new(1000, 562));
        assert_eq!(plan.content, Size::new(1000, 500));
        assert!(!plan.resized);
        assert_eq!((plan.pad_left, plan.pad_right), (0, 0));
        assert_eq!((plan.pad_top, plan.pad_bottom), (31, 31));
    }

    #[test]
    fn test_tall_source_pads_horizontally() {
        let plan = plan_fit(
            Size::new(500, 1000),
            &RatioSpec::Ratio {
                width: 9.0,
                height: 16.0,
            },
        )
        .unwrap();

        assert_eq!(plan.canvas, Size::new(562, 1000));
        assert_eq!(plan.content, Size::new(500, 1000));
        assert_eq!((plan.pad_left, plan.pad_right), (31, 31));
        assert_eq!((plan.pad_top, plan.pad_bottom), (0, 0));
    }

    #[test]
    fn test_explicit_size_downscale() {
        // 2000x1000 into 800x600: scale 0.4, centered vertically.
        let plan = plan_fit(
            Size::new(2000, 1000),
            &RatioSpec::ExplicitSize {
                width: 800,
                height: 600,
            },
        )
        .unwrap();

        assert_eq!(plan.content, Size::new(800, 400));
        assert_eq!(plan.canvas, Size::new(800, 600));
        assert!(plan.resized);
        assert_eq!((plan.pad_left, plan.pad_right), (0, 0));
        assert_eq!((plan.pad_top, plan.pad_bottom), (100, 100));
    }

    #[test]
    fn test_explicit_size_upscales_small_source() {
        let plan = plan_fit(
            Size::new(100, 50),
            &RatioSpec::ExplicitSize {
                width: 800,
                height: 600,
            },
        )
        .unwrap();

        assert_eq!(plan.content, Size::new(800, 400));
        assert_eq!(plan.canvas, Size::new(800, 600));
        assert!(plan.resized);
    }

    #[test]
    fn test_ratio_within_tolerance_passes_through() {
        let plan = plan_fit(
            Size::new(1600, 900),
            &RatioSpec::Ratio {
                width: 16.0,
                height: 9.0,
            },
        )
        .unwrap();

        assert!(plan.is_passthrough());
        assert_eq!(plan.canvas, Size::new(1600, 900));
        assert_eq!(
            (plan.pad_left, plan.pad_right, plan.pad_top, plan.pad_bottom),
            (0, 0, 0, 0)
        );
    }

    #[test]
    fn test_ratio_near_tolerance_passes_through() {
        // 1599/900 = 1.7767, within 0.01 of 16/9.
        let plan = plan_fit(
            Size::new(1599, 900),
            &RatioSpec::Ratio {
                width: 16.0,
                height: 9.0,
            },
        )
        .unwrap();
        assert!(plan.is_passthrough());
    }

    #[test]
    fn test_odd_gap_goes_to_trailing_edge() {
        // Canvas 562, content 501: gap 61 splits 30/31.
        let plan = plan_fit(
            Size::new(1000, 501),
            &RatioSpec::Ratio {
                width: 16.0,
                height: 9.0,
            },
        )
        .unwrap();

        assert_eq!(plan.canvas.height, 562);
        assert_eq!((plan.pad_top, plan.pad_bottom), (30, 31));
    }

    #[test]
    fn test_explicit_size_odd_gap_horizontal() {
        let plan = plan_fit(
            Size::new(999, 600),
            &RatioSpec::ExplicitSize {
                width: 1000,
                height: 600,
            },
        )
        .unwrap();

        assert_eq!(plan.content, Size::new(999, 600));
        assert!(!plan.resized);
        assert_eq!((plan.pad_left, plan.pad_right), (0, 1));
    }

    #[test]
    fn test_padding_sums_to_canvas() {
        let cases = [
            (Size::new(1000, 500), RatioSpec::Ratio { width: 16.0, height: 9.0 }),
            (Size::new(733, 911), RatioSpec::Ratio { width: 4.0, height: 3.0 }),
            (Size::new(2000, 1000), RatioSpec::ExplicitSize { width: 800, height: 600 }),
            (Size::new(123, 457), RatioSpec::ExplicitSize { width: 300, height: 200 }),
        ];

        for (source, target) in cases {
            let plan = plan_fit(source, &target).unwrap();
            assert_eq!(
                plan.pad_left + plan.content.width + plan.pad_right,
                plan.canvas.width
            );
            assert_eq!(
                plan.pad_top + plan.content.height + plan.pad_bottom,
                plan.canvas.height
            );
            assert!(plan.content.width <= plan.canvas.width);
            assert!(plan.content.height <= plan.canvas.height);
        }
    }

    #[test]
    fn test_ratio_canvas_matches_target_within_one_pixel() {
        let cases = [
            (Size::new(1000, 500), 16.0, 9.0),
            (Size::new(730, 911), 4.0, 3.0),
            (Size::new(350, 1080), 1.0, 1.0),
        ];

        for (source, w, h) in cases {
            let plan = plan_fit(source, &RatioSpec::Ratio { width: w, height: h }).unwrap();
            let effective = f64::from(plan.canvas.width) - f64::from(plan.canvas.height) * w / h;
            assert!(
                effective.abs() <= 1.0,
                "canvas {} off target {w}:{h} by {effective}",
                plan.canvas
            );
        }
    }

    #[test]
    fn test_explicit_size_touches_target_on_one_axis() {
        let plan = plan_fit(
            Size::new(640, 480),
            &RatioSpec::ExplicitSize {
                width: 1000,
                height: 500,
            },
        )
        .unwrap();

        // Height-constrained: 480 * (500/480) = 500.
        assert_eq!(plan.content.height, 500);
        assert!(plan.content.width <= 1000);
    }

    #[test]
    fn test_oversized_content_is_rescaled_to_fit() {
        // Exercises the correction branch directly with content that would
        // overflow the canvas.
        let plan = distribute_padding(
            Size::new(900, 500),
            Size::new(900, 500),
            Size::new(800, 600),
        );

        assert_eq!(plan.content, Size::new(800, 444));
        assert!(plan.resized);
        assert_eq!((plan.pad_left, plan.pad_right), (0, 0));
        assert_eq!((plan.pad_top, plan.pad_bottom), (78, 78));
    }

    #[test]
    fn test_zero_source_rejected() {
        let err = plan_fit(
            Size::new(0, 100),
            &RatioSpec::Ratio {
                width: 16.0,
                height: 9.0,
            },
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::EmptySource { .. }));
    }

    #[test]
    fn test_tiny_target_keeps_one_pixel() {
        let plan = plan_fit(
            Size::new(1000, 500),
            &RatioSpec::ExplicitSize {
                width: 1,
                height: 1,
            },
        )
        .unwrap();

        assert!(plan.content.width >= 1);
        assert!(plan.content.height >= 1);
        assert_eq!(plan.canvas, Size::new(1, 1));
    }
}
