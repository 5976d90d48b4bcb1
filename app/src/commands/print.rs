//! `print` subcommand.
//!
//! Expands the input list, builds a job spec from the flags and
//! environment, and runs it through the sequencer against either a
//! CUPS sink or an in-memory sink for dry runs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use layout_engine::{Margins, PhysicalSize, RatioSpec, Resolution, px_to_mm};
use print_sink::{CupsSink, MemorySink, PrinterInfo, resolve_printer};
use tracing::{info, warn};

use crate::cli::PrintArgs;
use crate::config;
use crate::job::{CancelToken, JobReport, PageOutcome, PrintJobSpec, RenderMode};
use crate::sequencer;

/// Extensions picked up when a directory is expanded.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

const DEFAULT_WIDTH_MM: f64 = 105.0;
const DEFAULT_HEIGHT_MM: f64 = 55.0;

pub fn run(args: PrintArgs) -> anyhow::Result<()> {
    let images = expand_image_paths(&args.images)?;

    let mode = match &args.target {
        Some(target) => RenderMode::Padded(
            RatioSpec::parse(target).with_context(|| format!("Invalid pad target: {target}"))?,
        ),
        None => RenderMode::Page(args.fit.policy()),
    };

    let resolution = Resolution::new(args.dpi);
    let size = page_size(&args, &mode, resolution);
    let margins = Margins::new(args.margin_left_mm, args.margin_top_mm);

    if args.dry_run {
        let spec = PrintJobSpec {
            images,
            copies: args.copies,
            size,
            margins,
            resolution,
            mode,
            darkness: args.darkness,
        };
        let mut sink = MemorySink::new();
        let report = sequencer::run_job(&spec, &mut sink, &CancelToken::new())?;
        println!(
            "Dry run: {} page(s) rendered, {} skipped",
            report.printed_count(),
            report.skipped_count()
        );
        print_skips(&report);
        return Ok(());
    }

    let requested = args.printer.clone().or_else(config::printer_from_env);
    let printer = resolve_printer(requested.as_deref())?;
    let darkness = gate_darkness(args.darkness, &printer);

    let spec = PrintJobSpec {
        images,
        copies: args.copies,
        size,
        margins,
        resolution,
        mode,
        darkness,
    };

    info!(
        printer = %printer.name,
        images = spec.images.len(),
        copies = spec.copies,
        "Submitting print job"
    );

    let mut sink = CupsSink::new(&printer.name);
    let report = sequencer::run_job(&spec, &mut sink, &CancelToken::new())?;

    println!(
        "Printed {} page(s) on {}",
        report.printed_count(),
        printer.name
    );
    print_skips(&report);
    Ok(())
}

fn print_skips(report: &JobReport) {
    for page in report.skipped() {
        if let PageOutcome::Skipped { reason } = &page.outcome {
            println!("Skipped {}: {}", page.image.display(), reason);
        }
    }
}

/// Expand directories in the input list into their image files, sorted.
/// Plain file paths pass through untouched, in the order given.
fn expand_image_paths(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut expanded = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(path)
                .with_context(|| format!("Cannot read directory: {}", path.display()))?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|p| is_image_file(p))
                .collect();
            entries.sort();
            anyhow::ensure!(
                !entries.is_empty(),
                "No image files found in {}",
                path.display()
            );
            expanded.extend(entries);
        } else {
            expanded.push(path.clone());
        }
    }

    Ok(expanded)
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Page size in millimeters. Explicit flags win; an exact-size pad target
/// sizes the page to the padded canvas; otherwise the 105x55 label default.
fn page_size(args: &PrintArgs, mode: &RenderMode, resolution: Resolution) -> PhysicalSize {
    if args.width_mm.is_none() && args.height_mm.is_none() {
        if let RenderMode::Padded(RatioSpec::ExplicitSize { width, height }) = mode {
            return PhysicalSize::new(
                px_to_mm(*width, resolution.dpi),
                px_to_mm(*height, resolution.dpi),
            );
        }
    }

    PhysicalSize::new(
        args.width_mm.unwrap_or(DEFAULT_WIDTH_MM),
        args.height_mm.unwrap_or(DEFAULT_HEIGHT_MM),
    )
}

/// Drop a requested darkness when the driver would reject the option.
pub(crate) fn gate_darkness(requested: Option<u8>, printer: &PrinterInfo) -> Option<u8> {
    match requested {
        Some(value) if printer.supports_darkness => Some(value),
        Some(value) => {
            warn!(
                printer = %printer.name,
                darkness = value,
                "Printer does not support darkness, ignoring"
            );
            None
        }
        None => None,
    }
}
