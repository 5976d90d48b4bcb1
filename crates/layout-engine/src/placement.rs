//! Page layout planning for print rendering.
//!
//! Maps a source image onto a physical page: stretch fills the target area
//! exactly, contain preserves the source ratio and centers the remainder.
//! The planner works entirely in pixel space after one mm conversion; it
//! never touches the raster.

use tracing::debug;

use crate::geometry::{Rect, Size, round_px};
use crate::units::{Margins, PhysicalSize, Resolution};
use crate::{LayoutError, Result};

/// How source content is fitted to the page target area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitPolicy {
    /// Fill the target area exactly, distorting when ratios differ.
    Stretch,
    /// Preserve the source ratio, centered inside the target area.
    ContainCentered,
}

/// A deterministic placement of one image on one page.
///
/// `canvas` is the full page in pixels and is fixed by the physical paper
/// size alone; margins only shift `target` and the content offset, so content
/// can clip at the page edge when margins push it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub scaled: Size,
    pub offset: (u32, u32),
    pub canvas: Size,
    /// Margin-anchored target area, white-filled before drawing.
    pub target: Rect,
}

impl Placement {
    /// Rectangle the scaled content lands in.
    pub fn content_rect(&self) -> Rect {
        Rect::new(self.offset.0, self.offset.1, self.scaled.width, self.scaled.height)
    }

    /// Margin-anchored area to white-fill before drawing the content.
    pub fn fill_rect(&self) -> Rect {
        self.target
    }
}

/// Plan the placement of a source image on a physical page.
pub fn plan_page(
    source: Size,
    page: PhysicalSize,
    margins: Margins,
    resolution: Resolution,
    policy: FitPolicy,
) -> Result<Placement> {
    page.validate()?;
    margins.validate()?;
    resolution.validate()?;
    if source.width == 0 || source.height == 0 {
        return Err(LayoutError::EmptySource {
            width: source.width,
            height: source.height,
        });
    }

    let target = page.to_px(resolution);
    let (margin_left, margin_top) = margins.to_px(resolution);

    let (scaled, offset) = match policy {
        FitPolicy::Stretch => (target, (margin_left, margin_top)),
        FitPolicy::ContainCentered => {
            let source_ratio = source.aspect_ratio();
            let target_ratio = target.aspect_ratio();
            let scaled = if source_ratio > target_ratio {
                Size::new(target.width, round_px(f64::from(target.width) / source_ratio))
            } else {
                Size::new(round_px(f64::from(target.height) * source_ratio), target.height)
            };
            let offset = (
                margin_left + (target.width - scaled.width) / 2,
                margin_top + (target.height - scaled.height) / 2,
            );
            (scaled, offset)
        }
    };

    debug!(
        %source,
        %target,
        ?policy,
        scaled = %scaled,
        offset_x = offset.0,
        offset_y = offset.1,
        "Planned page placement"
    );

    Ok(Placement {
        scaled,
        offset,
        canvas: target,
        target: Rect::new(margin_left, margin_top, target.width, target.height),
    })
}
