//! Raster materialization of fit-and-pad plans.
//!
//! Scales with Lanczos3 filtering and composites onto a white canvas. File
//! output follows the `_padded` / `_resized` naming convention.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use tracing::{debug, info};

use crate::fit::{PadPlan, plan_fit};
use crate::geometry::Size;
use crate::ratio::RatioSpec;
use crate::{LayoutError, Result};

/// Opaque white, the padding fill for print output.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Pad or scale an image onto a white canvas per the target.
///
/// Returns the canvas together with the plan that produced it. A source
/// within ratio tolerance is returned unchanged on a canvas of its own size.
pub fn pad_image(img: &DynamicImage, target: &RatioSpec) -> Result<(RgbaImage, PadPlan)> {
    let source = Size::new(img.width(), img.height());
    let plan = plan_fit(source, target)?;

    let content = if plan.content == source {
        debug!(%source, "Content keeps source dimensions, skipping resize");
        img.to_rgba8()
    } else {
        img.resize_exact(plan.content.width, plan.content.height, FilterType::Lanczos3)
            .to_rgba8()
    };

    if plan.is_passthrough() {
        return Ok((content, plan));
    }

    let mut canvas = RgbaImage::from_pixel(plan.canvas.width, plan.canvas.height, WHITE);
    image::imageops::overlay(
        &mut canvas,
        &content,
        i64::from(plan.pad_left),
        i64::from(plan.pad_top),
    );
    Ok((canvas, plan))
}

/// Pad an image file and write the result next to it (or to `output`).
///
/// Derived names append `_padded` for ratio targets and `_resized` for
/// explicit sizes: `photo.jpg` becomes `photo_padded.jpg`. The canvas is
/// flattened to RGB before encoding so JPEG outputs work.
pub fn pad_image_file(
    path: &Path,
    target: &RatioSpec,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let img = image::open(path).map_err(|source| LayoutError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let (canvas, plan) = pad_image(&img, target)?;

    let out_path = match output {
        Some(p) => p.to_path_buf(),
        None => derived_output_path(path, target),
    };

    let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();
    rgb.save(&out_path).map_err(|source| LayoutError::Write {
        path: out_path.clone(),
        source,
    })?;

    info!(
        input = %path.display(),
        output = %out_path.display(),
        canvas = %plan.canvas,
        resized = plan.resized,
        "Wrote padded image"
    );
    Ok(out_path)
}

fn derived_output_path(path: &Path, target: &RatioSpec) -> PathBuf {
    let suffix = match target {
        RatioSpec::Ratio { .. } => "_padded",
        RatioSpec::ExplicitSize { .. } => "_resized",
    };

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{stem}{suffix}");
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}
