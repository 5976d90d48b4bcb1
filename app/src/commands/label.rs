//! `label` subcommand.
//!
//! Renders text to a white-background image, then either writes it out
//! or prints it on a page sized to the label itself.

use std::path::Path;

use ab_glyph::FontRef;
use anyhow::Context;
use image::{DynamicImage, RgbaImage};
use layout_engine::{FitPolicy, Margins, PhysicalSize, Resolution, px_to_mm, render_label};
use print_sink::{CupsSink, resolve_printer};
use tracing::info;

use crate::cli::LabelArgs;
use crate::commands::print::gate_darkness;
use crate::config;
use crate::job::{CancelToken, PrintJobSpec, RenderMode};
use crate::sequencer;

pub fn run(args: LabelArgs) -> anyhow::Result<()> {
    let font_data = load_font_data(args.font.as_deref())?;
    let font =
        FontRef::try_from_slice(&font_data).context("Failed to parse font data (TTF/OTF)")?;

    let label = render_label(&font, &args.text, args.width_px, args.font_size);
    info!(width = label.width(), height = label.height(), "Rendered label");

    if let Some(output) = &args.output {
        let rgb = DynamicImage::ImageRgba8(label).to_rgb8();
        rgb.save(output)
            .with_context(|| format!("Cannot write label to {}", output.display()))?;
        println!("{}", output.display());
        return Ok(());
    }

    print_label(&args, &label)
}

/// Print the label on a page matching its pixel size at the given dpi,
/// so the content fills the page edge to edge.
fn print_label(args: &LabelArgs, label: &RgbaImage) -> anyhow::Result<()> {
    let requested = args.printer.clone().or_else(config::printer_from_env);
    let printer = resolve_printer(requested.as_deref())?;
    let darkness = gate_darkness(args.darkness, &printer);

    let size = PhysicalSize::new(
        px_to_mm(label.width(), args.dpi),
        px_to_mm(label.height(), args.dpi),
    );

    let dir = std::env::temp_dir().join("printdesk-label");
    std::fs::create_dir_all(&dir).context("Cannot create label staging directory")?;
    let path = dir.join(format!("label_{}.png", std::process::id()));
    label
        .save(&path)
        .with_context(|| format!("Cannot write label to {}", path.display()))?;

    let spec = PrintJobSpec {
        images: vec![path.clone()],
        copies: args.copies,
        size,
        margins: Margins::default(),
        resolution: Resolution::new(args.dpi),
        mode: RenderMode::Page(FitPolicy::ContainCentered),
        darkness,
    };

    let mut sink = CupsSink::new(&printer.name);
    let result = sequencer::run_job(&spec, &mut sink, &CancelToken::new());
    let _ = std::fs::remove_file(&path);
    let report = result?;

    anyhow::ensure!(report.printed_count() > 0, "Label page was not printed");
    println!("Printed label on {}", printer.name);
    Ok(())
}

/// Font bytes from `--font`, then `PRINTDESK_FONT`, then system fonts.
fn load_font_data(explicit: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    load_font_from(explicit, config::font_from_env().as_deref())
}

fn load_font_from(explicit: Option<&Path>, env: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    if let Some(path) = explicit {
        return std::fs::read(path)
            .with_context(|| format!("Cannot read font {}", path.display()));
    }
    if let Some(path) = env {
        return std::fs::read(path)
            .with_context(|| format!("Cannot read font {}", path.display()));
    }
    for path in system_font_candidates() {
        if let Ok(data) = std::fs::read(path) {
            info!(path = %path, "Using system font for label");
            return Ok(data);
        }
    }
    anyhow::bail!("No usable font found (pass --font, set PRINTDESK_FONT, or install system fonts)")
}

fn system_font_candidates() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &[
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
        ]
    }
    #[cfg(target_os = "windows")]
    {
        &[
            "C:\\Windows\\Fonts\\arial.ttf",
            "C:\\Windows\\Fonts\\segoeui.ttf",
            "C:\\Windows\\Fonts\\msgothic.ttc",
        ]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_font(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn explicit_font_beats_env_font() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = temp_font(&dir, "explicit.ttf", b"explicit-bytes");
        let env = temp_font(&dir, "env.ttf", b"env-bytes");

        let data = load_font_from(Some(&explicit), Some(&env)).unwrap();
        assert_eq!(data, b"explicit-bytes");
    }

    #[test]
    fn env_font_used_when_no_explicit_font() {
        let dir = tempfile::tempdir().unwrap();
        let env = temp_font(&dir, "env.ttf", b"env-bytes");

        let data = load_font_from(None, Some(&env)).unwrap();
        assert_eq!(data, b"env-bytes");
    }

    #[test]
    fn unreadable_explicit_font_does_not_fall_through() {
        let dir = tempfile::tempdir().unwrap();
        let env = temp_font(&dir, "env.ttf", b"env-bytes");
        let missing = dir.path().join("missing.ttf");

        let err = load_font_from(Some(&missing), Some(&env)).unwrap_err();
        assert!(err.to_string().contains("Cannot read font"));
    }

    #[test]
    fn unreadable_env_font_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.ttf");

        let err = load_font_from(None, Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("Cannot read font"));
    }
}
