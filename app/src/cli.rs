//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use layout_engine::FitPolicy;

#[derive(Debug, Parser)]
#[command(name = "printdesk", version, about = "Print images and labels with deterministic page layout")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print images, one page per image
    Print(PrintArgs),
    /// Pad or resize a single image to an aspect target
    Pad(PadArgs),
    /// Render a text label and print it or save it
    Label(LabelArgs),
    /// List printers known to CUPS
    Printers(PrintersArgs),
}

#[derive(Debug, Args)]
pub struct PrintArgs {
    /// Image files or directories (directories expand to their image files, sorted)
    #[arg(value_name = "IMAGE", required = true)]
    pub images: Vec<PathBuf>,

    /// Printer queue name; falls back to PRINTDESK_PRINTER, then the system default
    #[arg(short, long)]
    pub printer: Option<String>,

    /// Page width in millimeters (default 105, or derived from a WxH target)
    #[arg(long, value_name = "MM")]
    pub width_mm: Option<f64>,

    /// Page height in millimeters (default 55, or derived from a WxH target)
    #[arg(long, value_name = "MM")]
    pub height_mm: Option<f64>,

    /// Left margin in millimeters
    #[arg(long, value_name = "MM", default_value_t = 0.0)]
    pub margin_left_mm: f64,

    /// Top margin in millimeters
    #[arg(long, value_name = "MM", default_value_t = 0.0)]
    pub margin_top_mm: f64,

    /// Render resolution in dots per inch
    #[arg(long, default_value_t = 300.0)]
    pub dpi: f64,

    /// Collated copies of the whole job
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=99))]
    pub copies: u32,

    /// How each image is fitted to the page area
    #[arg(long, value_enum, default_value_t = FitMode::Contain)]
    pub fit: FitMode,

    /// Pad each image to a ratio ("16:9") or exact size ("800x600") before placing it
    #[arg(long, value_name = "TARGET", conflicts_with = "fit")]
    pub target: Option<String>,

    /// Darkness 0-30, honored only by printers that support it
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=30))]
    pub darkness: Option<u8>,

    /// Render pages in memory without contacting a printer
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct PadArgs {
    /// Image file to pad or resize
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Target ratio ("16:9") or exact size ("800x600")
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Output path; defaults to the input name with a _padded or _resized suffix
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct LabelArgs {
    /// Text to render; literal newlines start new lines
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// TrueType or OpenType font file; falls back to PRINTDESK_FONT
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Label width in pixels
    #[arg(long, default_value_t = 1240)]
    pub width_px: u32,

    /// Font size in pixels
    #[arg(long, default_value_t = layout_engine::text::DEFAULT_FONT_SIZE)]
    pub font_size: f32,

    /// Write the label image here instead of printing it
    #[arg(short, long, conflicts_with = "printer")]
    pub output: Option<PathBuf>,

    /// Printer queue name; when given, the label is printed at its pixel size
    #[arg(short, long)]
    pub printer: Option<String>,

    /// Render resolution in dots per inch, used to size the printed label
    #[arg(long, default_value_t = 300.0)]
    pub dpi: f64,

    /// Collated copies
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=99))]
    pub copies: u32,

    /// Darkness 0-30, honored only by printers that support it
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=30))]
    pub darkness: Option<u8>,
}

#[derive(Debug, Args)]
pub struct PrintersArgs {
    /// Emit the printer list as JSON
    #[arg(long)]
    pub json: bool,
}

/// Page fit policy as exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FitMode {
    /// Preserve aspect ratio, center on the page, fill the rest with white
    #[default]
    Contain,
    /// Fill the page area exactly, distorting the image if ratios differ
    Stretch,
}

impl FitMode {
    pub fn policy(self) -> FitPolicy {
        match self {
            FitMode::Contain => FitPolicy::ContainCentered,
            FitMode::Stretch => FitPolicy::Stretch,
        }
    }
}
